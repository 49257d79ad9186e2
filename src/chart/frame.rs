//! The drawn output of one render pass, independent of any drawing backend.
//! The egui painter and the SVG writer both consume a `ChartFrame`.

use crate::chart::axis::{Axis, GridLine};
use crate::chart::curve::LinePath;
use crate::config::Rgba;

/// A pixel coordinate on the canvas (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Pos {
    pub x: f64,
    pub y: f64,
}

impl Pos {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Pos,
    pub max: Pos,
}

impl Rect {
    pub fn from_size(width: f64, height: f64) -> Self {
        Self {
            min: Pos::new(0.0, 0.0),
            max: Pos::new(width, height),
        }
    }

    pub fn contains(&self, p: Pos) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

/// Per-chart lifecycle. Every data change restarts at `Empty`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderState {
    #[default]
    Empty,
    Scaled,
    Drawn,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StrokePaint {
    Solid(Rgba),
    /// Color varies with canvas y, `stops` spread evenly from `from_y` to `to_y`
    VerticalGradient {
        from_y: f64,
        to_y: f64,
        stops: &'static [&'static str],
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct StyledPath {
    pub path: LinePath,
    pub paint: StrokePaint,
    pub width: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartFrame {
    pub width: f64,
    pub height: f64,
    pub state: RenderState,
    pub x_axis: Option<Axis>,
    pub y_axis: Option<Axis>,
    pub gridlines: Vec<GridLine>,
    pub line: Option<StyledPath>,
}

impl ChartFrame {
    pub fn empty(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            state: RenderState::Empty,
            x_axis: None,
            y_axis: None,
            gridlines: Vec::new(),
            line: None,
        }
    }

    /// Equivalent of `selectAll("*").remove()`
    pub fn clear(&mut self) {
        *self = Self::empty(self.width, self.height);
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }

    pub fn has_line(&self) -> bool {
        self.line.is_some()
    }
}
