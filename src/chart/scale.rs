//! Linear and time scales mapping data values to canvas pixels.

use crate::chart::time_ticks;
use crate::config::{CHART_PRESETS, ChartConfig};
use crate::domain::Point;
use crate::utils::maths_utils;

/// Lower bound of the y domain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YBaseline {
    /// `[min(value), max(value)]`
    Extent,
    /// `[0, max(value)]`
    Zero,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    pub fn apply(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = d1 - d0;
        if span == 0.0 {
            return (r0 + r1) / 2.0;
        }
        r0 + (value - d0) / span * (r1 - r0)
    }

    pub fn invert(&self, pixel: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = r1 - r0;
        if span == 0.0 {
            return (d0 + d1) / 2.0;
        }
        d0 + (pixel - r0) / span * (d1 - d0)
    }

    /// Round the domain outward to tick boundaries
    pub fn nice(self, count: usize) -> Self {
        let (d0, d1) = self.domain;
        let domain = if d1 < d0 {
            let (hi, lo) = maths_utils::nice(d1, d0, count);
            (lo, hi)
        } else {
            maths_utils::nice(d0, d1, count)
        };
        Self { domain, ..self }
    }

    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (d0, d1) = self.domain;
        maths_utils::ticks(d0.min(d1), d0.max(d1), count)
    }
}

/// Linear scale over epoch milliseconds with calendar-aware ticks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeScale {
    inner: LinearScale,
}

impl TimeScale {
    pub fn new(domain_ms: (f64, f64), range: (f64, f64)) -> Self {
        Self {
            inner: LinearScale::new(domain_ms, range),
        }
    }

    pub fn domain(&self) -> (f64, f64) {
        self.inner.domain()
    }

    pub fn range(&self) -> (f64, f64) {
        self.inner.range()
    }

    pub fn apply(&self, time_ms: i64) -> f64 {
        self.inner.apply(time_ms as f64)
    }

    /// Pixel back to (fractional) epoch milliseconds
    pub fn invert(&self, pixel: f64) -> f64 {
        self.inner.invert(pixel)
    }

    pub fn ticks(&self, count: usize) -> Vec<i64> {
        let (d0, d1) = self.domain();
        time_ticks::time_ticks(d0.min(d1) as i64, d0.max(d1) as i64, count)
    }
}

fn time_domain(points: &[Point]) -> (f64, f64) {
    let times: Vec<i64> = points.iter().map(|p| p.time_ms).collect();
    match maths_utils::extent_i64(&times) {
        None => (0.0, 1.0),
        Some((t0, t1)) if t0 == t1 => {
            let pad = CHART_PRESETS.degenerate_time_pad_ms;
            (t0 as f64 - pad, t1 as f64 + pad)
        }
        Some((t0, t1)) => (t0 as f64, t1 as f64),
    }
}

fn value_domain(points: &[Point], baseline: YBaseline) -> (f64, f64) {
    let values: Vec<f64> = points
        .iter()
        .map(|p| p.value)
        .filter(|v| v.is_finite())
        .collect();

    let Some((min, max)) = maths_utils::extent(&values) else {
        return (0.0, 1.0);
    };

    let (lo, hi) = match baseline {
        YBaseline::Extent => (min, max),
        YBaseline::Zero => (max.min(0.0), max.max(0.0)),
    };

    if lo == hi {
        let pad = if lo == 0.0 { 1.0 } else { lo.abs() * 0.01 };
        (lo - pad, hi + pad)
    } else {
        (lo, hi)
    }
}

/// Fit both scales to `points` on the configured canvas.
/// Never fails: empty or flat input falls back to a finite default domain.
pub fn compute_scales(points: &[Point], config: &ChartConfig) -> (TimeScale, LinearScale) {
    let m = &config.margins;

    let x = TimeScale::new(
        time_domain(points),
        (m.left, config.width - m.right),
    );

    // Inverted: pixel y grows downward, price grows upward
    let y = LinearScale::new(
        value_domain(points, config.y_baseline),
        (config.height - m.bottom, m.top),
    )
    .nice(config.nice_count);

    (x, y)
}
