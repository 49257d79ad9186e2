//! Plot visualization configuration

/// RGBA color independent of any drawing backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba(pub u8, pub u8, pub u8, pub u8);

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self(r, g, b, 255)
    }

    /// `#rrggbb`, alpha dropped
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

pub struct PlotConfig {
    pub line_color: Rgba,
    pub axis_color: Rgba,
    /// Axis domain line on the history chart
    pub axis_domain_color: Rgba,
    pub tick_label_color: Rgba,
    pub grid_color: Rgba,
    // Top-to-bottom stops for the gradient stroke
    pub line_gradient_colors: &'static [&'static str],
    pub focus_fill: Rgba,
    pub focus_stroke: Rgba,
    pub focus_radius: f64,
    pub focus_stroke_width: f64,
    pub tick_size: f64,
    pub tick_label_font_size: f64,
    pub background: Rgba,
}

pub const PLOT_CONFIG: PlotConfig = PlotConfig {
    line_color: Rgba::rgb(70, 130, 180), // Steel blue
    axis_color: Rgba::rgb(0, 0, 0),
    axis_domain_color: Rgba::rgb(204, 204, 204),
    tick_label_color: Rgba::rgb(0, 0, 0),
    grid_color: Rgba(204, 204, 204, 110),
    line_gradient_colors: &["#36d7b7", "#2ecc71"],
    focus_fill: Rgba::rgb(54, 215, 183),
    focus_stroke: Rgba::rgb(255, 255, 255),
    focus_radius: 5.0,
    focus_stroke_width: 2.0,
    tick_size: 6.0,
    tick_label_font_size: 10.0,
    background: Rgba::rgb(255, 255, 255),
};
