use crate::chart::axis::{Axis, gridlines};
use crate::chart::curve::draw_line;
use crate::chart::frame::{ChartFrame, StrokePaint, StyledPath};
use crate::chart::scale::{LinearScale, TimeScale};
use crate::config::{ChartConfig, PLOT_CONFIG};
use crate::domain::Point;

/// Context passed to every layer during a render pass.
/// This prevents argument explosion.
pub struct LayerContext<'a> {
    pub points: &'a [Point],
    pub x: &'a TimeScale,
    pub y: &'a LinearScale,
    pub config: &'a ChartConfig,
    /// Axes for this pass, built once and shared by the grid and axis layers
    pub x_axis: &'a Axis,
    pub y_axis: &'a Axis,
}

/// A standardized layer in the chart stack.
pub trait ChartLayer {
    fn draw(&self, frame: &mut ChartFrame, ctx: &LayerContext);
}

// ============================================================================
// 1. GRID LAYER
// ============================================================================
pub struct GridLayer;

impl ChartLayer for GridLayer {
    fn draw(&self, frame: &mut ChartFrame, ctx: &LayerContext) {
        if !ctx.config.show_gridlines {
            return;
        }
        frame.gridlines = gridlines(ctx.x_axis, ctx.y_axis);
    }
}

// ============================================================================
// 2. PRICE LINE LAYER
// ============================================================================
pub struct LineLayer;

impl ChartLayer for LineLayer {
    fn draw(&self, frame: &mut ChartFrame, ctx: &LayerContext) {
        // No data: nothing to stroke
        if ctx.points.is_empty() {
            return;
        }

        let path = draw_line(ctx.points, ctx.x, ctx.y, ctx.config.curve);
        let paint = if ctx.config.gradient_stroke {
            StrokePaint::VerticalGradient {
                from_y: 0.0,
                to_y: ctx.config.height,
                stops: PLOT_CONFIG.line_gradient_colors,
            }
        } else {
            StrokePaint::Solid(PLOT_CONFIG.line_color)
        };

        frame.line = Some(StyledPath {
            path,
            paint,
            width: ctx.config.stroke_width,
        });
    }
}

// ============================================================================
// 3. AXIS LAYER
// ============================================================================
pub struct AxisLayer;

impl ChartLayer for AxisLayer {
    fn draw(&self, frame: &mut ChartFrame, ctx: &LayerContext) {
        frame.x_axis = Some(ctx.x_axis.clone());
        frame.y_axis = Some(ctx.y_axis.clone());
    }
}

/// Back to front
pub fn default_layer_stack() -> Vec<Box<dyn ChartLayer>> {
    vec![Box::new(GridLayer), Box::new(LineLayer), Box::new(AxisLayer)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::axis::{TickFormat, draw_axes};
    use crate::chart::scale::compute_scales;
    use crate::config::CHART_PRESETS;

    #[test]
    fn test_gridlines_follow_shared_axis_ticks() {
        let config = CHART_PRESETS.history;
        let points = vec![
            Point::new(1_700_000_000_000, 100.5),
            Point::new(1_700_086_400_000, 102.3),
            Point::new(1_700_172_800_000, 99.1),
        ];
        let (x, y) = compute_scales(&points, &config);
        let (x_axis, y_axis) = draw_axes(&x, &y, TickFormat::CalendarDate, config.tick_count);
        let ctx = LayerContext {
            points: &points,
            x: &x,
            y: &y,
            config: &config,
            x_axis: &x_axis,
            y_axis: &y_axis,
        };

        let mut frame = ChartFrame::empty(config.width, config.height);
        for layer in default_layer_stack() {
            layer.draw(&mut frame, &ctx);
        }

        assert_eq!(frame.x_axis.as_ref(), Some(&x_axis));
        assert_eq!(frame.y_axis.as_ref(), Some(&y_axis));

        let n_x = x_axis.ticks.len();
        assert_eq!(frame.gridlines.len(), n_x + y_axis.ticks.len());
        for (line, tick) in frame.gridlines[..n_x].iter().zip(&x_axis.ticks) {
            assert_eq!(line.from.x, tick.position);
            assert_eq!(line.to.x, tick.position);
        }
        for (line, tick) in frame.gridlines[n_x..].iter().zip(&y_axis.ticks) {
            assert_eq!(line.from.y, tick.position);
            assert_eq!(line.to.y, tick.position);
        }
        assert!(frame.line.is_some());
    }

    #[test]
    fn test_line_layer_skips_empty_points() {
        let config = CHART_PRESETS.realtime;
        let (x, y) = compute_scales(&[], &config);
        let (x_axis, y_axis) = draw_axes(&x, &y, TickFormat::ClockTime, config.tick_count);
        let ctx = LayerContext {
            points: &[],
            x: &x,
            y: &y,
            config: &config,
            x_axis: &x_axis,
            y_axis: &y_axis,
        };

        let mut frame = ChartFrame::empty(config.width, config.height);
        LineLayer.draw(&mut frame, &ctx);
        AxisLayer.draw(&mut frame, &ctx);
        assert!(frame.line.is_none());
        assert!(frame.x_axis.is_some());
    }
}
