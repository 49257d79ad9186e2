use crate::chart::frame::Pos;
use crate::chart::scale::{LinearScale, TimeScale};
use crate::domain::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CurveStyle {
    #[default]
    Linear,
    /// Monotone cubic in x (Steffen), never overshoots between samples
    MonotoneX,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(Pos),
    LineTo(Pos),
    CubicTo { c1: Pos, c2: Pos, to: Pos },
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct LinePath {
    pub commands: Vec<PathCommand>,
}

impl LinePath {
    /// Number of drawn segments (everything after the initial MoveTo)
    pub fn segment_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| !matches!(c, PathCommand::MoveTo(_)))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// SVG `d` attribute
    pub fn to_svg_d(&self) -> String {
        self.commands
            .iter()
            .map(|c| match c {
                PathCommand::MoveTo(p) => format!("M{:.3},{:.3}", p.x, p.y),
                PathCommand::LineTo(p) => format!("L{:.3},{:.3}", p.x, p.y),
                PathCommand::CubicTo { c1, c2, to } => format!(
                    "C{:.3},{:.3},{:.3},{:.3},{:.3},{:.3}",
                    c1.x, c1.y, c2.x, c2.y, to.x, to.y
                ),
            })
            .collect()
    }

    /// Polyline approximation; each cubic becomes `steps` straight pieces
    pub fn flatten(&self, steps: usize) -> Vec<Pos> {
        let steps = steps.max(1);
        let mut out: Vec<Pos> = Vec::new();
        for command in &self.commands {
            match *command {
                PathCommand::MoveTo(p) | PathCommand::LineTo(p) => out.push(p),
                PathCommand::CubicTo { c1, c2, to } => {
                    let Some(&from) = out.last() else {
                        out.push(to);
                        continue;
                    };
                    for i in 1..=steps {
                        let t = i as f64 / steps as f64;
                        out.push(cubic_at(from, c1, c2, to, t));
                    }
                }
            }
        }
        out
    }
}

fn cubic_at(p0: Pos, p1: Pos, p2: Pos, p3: Pos, t: f64) -> Pos {
    let u = 1.0 - t;
    let a = u * u * u;
    let b = 3.0 * u * u * t;
    let c = 3.0 * u * t * t;
    let d = t * t * t;
    Pos::new(
        a * p0.x + b * p1.x + c * p2.x + d * p3.x,
        a * p0.y + b * p1.y + c * p2.y + d * p3.y,
    )
}

/// Path through `(x(time), y(value))` in input order. Points must already be time-sorted.
pub fn draw_line(points: &[Point], x: &TimeScale, y: &LinearScale, curve: CurveStyle) -> LinePath {
    let pixels: Vec<Pos> = points
        .iter()
        .map(|p| Pos::new(x.apply(p.time_ms), y.apply(p.value)))
        .collect();

    match curve {
        CurveStyle::Linear => linear_path(&pixels),
        CurveStyle::MonotoneX => monotone_path(&pixels),
    }
}

fn linear_path(pixels: &[Pos]) -> LinePath {
    let commands = pixels
        .iter()
        .enumerate()
        .map(|(i, &p)| {
            if i == 0 {
                PathCommand::MoveTo(p)
            } else {
                PathCommand::LineTo(p)
            }
        })
        .collect();
    LinePath { commands }
}

fn sign(v: f64) -> f64 {
    if v < 0.0 { -1.0 } else { 1.0 }
}

// A zero step takes the sign of the neighbouring step, so a vertical run
// divides out to an infinity pointing the same way as the x direction.
fn step_or_signed_zero(h: f64, other: f64) -> f64 {
    if h != 0.0 {
        h
    } else if other < 0.0 {
        -0.0
    } else {
        0.0
    }
}

// Tangent at the middle of three points
fn slope3(p0: Pos, p1: Pos, p2: Pos) -> f64 {
    let h0 = p1.x - p0.x;
    let h1 = p2.x - p1.x;
    let s0 = (p1.y - p0.y) / step_or_signed_zero(h0, h1);
    let s1 = (p2.y - p1.y) / step_or_signed_zero(h1, h0);
    let p = (s0 * h1 + s1 * h0) / (h0 + h1);

    // Any undefined magnitude flattens the tangent
    let magnitudes = [s0.abs(), s1.abs(), 0.5 * p.abs()];
    if magnitudes.iter().any(|m| m.is_nan()) {
        return 0.0;
    }
    let m = magnitudes.into_iter().fold(f64::INFINITY, f64::min);
    let t = (sign(s0) + sign(s1)) * m;
    if t.is_nan() || t == 0.0 { 0.0 } else { t }
}

// One-sided tangent at an endpoint, given the neighbour's tangent
fn slope2(p0: Pos, p1: Pos, t: f64) -> f64 {
    let h = p1.x - p0.x;
    if h != 0.0 {
        (3.0 * (p1.y - p0.y) / h - t) / 2.0
    } else {
        t
    }
}

fn monotone_path(pixels: &[Pos]) -> LinePath {
    // A point on the same pixel as the one before it adds nothing to the curve
    let mut pixels = pixels.to_vec();
    pixels.dedup();

    let n = pixels.len();
    if n < 3 {
        return linear_path(&pixels);
    }

    let mut tangents = vec![0.0; n];
    for i in 1..n - 1 {
        tangents[i] = slope3(pixels[i - 1], pixels[i], pixels[i + 1]);
    }
    tangents[0] = slope2(pixels[0], pixels[1], tangents[1]);
    tangents[n - 1] = slope2(pixels[n - 2], pixels[n - 1], tangents[n - 2]);

    let mut commands = Vec::with_capacity(n);
    commands.push(PathCommand::MoveTo(pixels[0]));
    for i in 0..n - 1 {
        let (a, b) = (pixels[i], pixels[i + 1]);
        let dx = (b.x - a.x) / 3.0;
        commands.push(PathCommand::CubicTo {
            c1: Pos::new(a.x + dx, a.y + dx * tangents[i]),
            c2: Pos::new(b.x - dx, b.y - dx * tangents[i + 1]),
            to: b,
        });
    }
    LinePath { commands }
}
