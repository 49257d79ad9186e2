//! Chart geometry presets for the three chart variants.

use crate::chart::curve::CurveStyle;
use crate::chart::scale::YBaseline;

/// Pixel margins around the plot area
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

/// Everything the renderer needs to lay out one chart instance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartConfig {
    pub width: f64,
    pub height: f64,
    pub margins: Margins,
    /// Approximate number of ticks per axis
    pub tick_count: usize,
    /// Tick count handed to the y-domain nicing step
    pub nice_count: usize,
    pub curve: CurveStyle,
    pub y_baseline: YBaseline,
    /// Full-width/height gridlines at tick positions
    pub show_gridlines: bool,
    /// Vertical gradient on the price stroke instead of a flat color
    pub gradient_stroke: bool,
    /// Focus marker + tooltip following the pointer
    pub hover_tracking: bool,
    pub stroke_width: f64,
}

pub struct ChartPresets {
    pub realtime: ChartConfig,
    pub history: ChartConfig,
    pub basic: ChartConfig,
    /// Maximum live samples kept across all symbols combined
    pub buffer_capacity: usize,
    /// Half-width of the x domain when every point shares one timestamp
    pub degenerate_time_pad_ms: f64,
}

pub const CHART_PRESETS: ChartPresets = ChartPresets {
    realtime: ChartConfig {
        width: 800.0,
        height: 400.0,
        margins: Margins {
            top: 20.0,
            right: 30.0,
            bottom: 40.0,
            left: 50.0,
        },
        tick_count: 5,
        nice_count: 5,
        curve: CurveStyle::MonotoneX,
        y_baseline: YBaseline::Extent,
        show_gridlines: false,
        gradient_stroke: false,
        hover_tracking: false,
        stroke_width: 2.0,
    },
    history: ChartConfig {
        width: 800.0,
        height: 400.0,
        margins: Margins {
            top: 20.0,
            right: 30.0,
            bottom: 40.0,
            left: 70.0, // room for "$12345.67" labels
        },
        tick_count: 5,
        nice_count: 5,
        curve: CurveStyle::Linear,
        y_baseline: YBaseline::Extent,
        show_gridlines: true,
        gradient_stroke: true,
        hover_tracking: true,
        stroke_width: 3.0,
    },
    basic: ChartConfig {
        width: 600.0,
        height: 400.0,
        margins: Margins {
            top: 20.0,
            right: 30.0,
            bottom: 30.0,
            left: 40.0,
        },
        tick_count: 5,
        nice_count: 5,
        curve: CurveStyle::Linear,
        y_baseline: YBaseline::Zero,
        show_gridlines: false,
        gradient_stroke: false,
        hover_tracking: false,
        stroke_width: 1.5,
    },
    buffer_capacity: 100,
    degenerate_time_pad_ms: 30_000.0,
};
