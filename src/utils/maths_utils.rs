use argminmax::ArgMinMax;

/// (min, max) of a slice, `None` when empty.
pub fn extent(values: &[f64]) -> Option<(f64, f64)> {
    if values.is_empty() {
        return None;
    }
    let (min_index, max_index) = values.argminmax();
    Some((values[min_index], values[max_index]))
}

/// (min, max) of integer timestamps, `None` when empty.
pub fn extent_i64(values: &[i64]) -> Option<(i64, i64)> {
    if values.is_empty() {
        return None;
    }
    let (min_index, max_index) = values.argminmax();
    Some((values[min_index], values[max_index]))
}

/// The (start index, end index, increment) of 1-2-5 round ticks covering
/// `[start, stop]`. A negative increment `-k` means a step of `1/k`.
pub fn tick_spec(start: f64, stop: f64, count: f64) -> (f64, f64, f64) {
    let e10 = 50f64.sqrt();
    let e5 = 10f64.sqrt();
    let e2 = 2f64.sqrt();

    let step = (stop - start) / count.max(0.0);
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= e10 {
        10.0
    } else if error >= e5 {
        5.0
    } else if error >= e2 {
        2.0
    } else {
        1.0
    };

    let (mut i1, mut i2, inc);
    if power < 0.0 {
        let inv = 10f64.powf(-power) / factor;
        i1 = (start * inv).round();
        i2 = (stop * inv).round();
        if i1 / inv < start {
            i1 += 1.0;
        }
        if i2 / inv > stop {
            i2 -= 1.0;
        }
        inc = -inv;
    } else {
        inc = 10f64.powf(power) * factor;
        i1 = (start / inc).round();
        i2 = (stop / inc).round();
        if i1 * inc < start {
            i1 += 1.0;
        }
        if i2 * inc > stop {
            i2 -= 1.0;
        }
    }

    if i2 < i1 && (0.5..2.0).contains(&count) {
        return tick_spec(start, stop, count * 2.0);
    }
    (i1, i2, inc)
}

pub fn tick_increment(start: f64, stop: f64, count: f64) -> f64 {
    tick_spec(start, stop, count).2
}

/// Round tick values inside `[start, stop]` (ascending input only).
pub fn ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if count == 0 || !start.is_finite() || !stop.is_finite() {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }
    let (i1, i2, inc) = tick_spec(start, stop, count as f64);
    if i2.is_nan() || i2 < i1 || !inc.is_finite() {
        return Vec::new();
    }
    let n = (i2 - i1) as i64 + 1;
    (0..n)
        .map(|i| {
            let k = i1 + i as f64;
            if inc < 0.0 { k / -inc } else { k * inc }
        })
        .collect()
}

/// Extend `[start, stop]` outward until both ends sit on tick boundaries.
pub fn nice(mut start: f64, mut stop: f64, count: usize) -> (f64, f64) {
    let mut prestep: Option<f64> = None;
    loop {
        let step = tick_increment(start, stop, count as f64);
        if prestep == Some(step) || step == 0.0 || !step.is_finite() {
            return (start, stop);
        } else if step > 0.0 {
            start = (start / step).floor() * step;
            stop = (stop / step).ceil() * step;
        } else {
            start = (start * step).ceil() / step;
            stop = (stop * step).floor() / step;
        }
        prestep = Some(step);
    }
}
