use strum_macros::EnumIter;

use crate::chart::axis::{TickFormat, draw_axes};
use crate::chart::frame::{ChartFrame, Pos, RenderState};
use crate::chart::hover::{Focus, HoverTracker, attach_hover_tracking};
use crate::chart::layers::{ChartLayer, LayerContext, default_layer_stack};
use crate::chart::scale::{LinearScale, TimeScale, compute_scales};
use crate::config::{CHART_PRESETS, ChartConfig};
#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::domain::Point;

/// Which chart variant is being drawn
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    EnumIter,
    clap::ValueEnum,
    serde::Serialize,
    serde::Deserialize,
)]
pub enum ChartMode {
    /// Live stream, clock-time axis, monotone curve
    #[default]
    RealTime,
    /// One-shot history, calendar axis, gridlines, gradient, hover
    History,
    /// Plain history line with a zero-based price axis
    Basic,
}

impl ChartMode {
    pub fn config(&self) -> ChartConfig {
        match self {
            ChartMode::RealTime => CHART_PRESETS.realtime,
            ChartMode::History => CHART_PRESETS.history,
            ChartMode::Basic => CHART_PRESETS.basic,
        }
    }

    pub fn x_tick_format(&self) -> TickFormat {
        match self {
            ChartMode::RealTime => TickFormat::ClockTime,
            ChartMode::History | ChartMode::Basic => TickFormat::CalendarDate,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ChartMode::RealTime => "Real-time",
            ChartMode::History => "History",
            ChartMode::Basic => "Basic",
        }
    }

    pub fn is_live(&self) -> bool {
        matches!(self, ChartMode::RealTime)
    }
}

/// Owns one chart instance and redraws it from scratch on every data change.
pub struct ChartRenderer {
    mode: ChartMode,
    config: ChartConfig,
    layers: Vec<Box<dyn ChartLayer>>,
    frame: ChartFrame,
    scales: Option<(TimeScale, LinearScale)>,
    hover: Option<HoverTracker>,
    drawn_version: Option<u64>,
}

impl ChartRenderer {
    pub fn new(mode: ChartMode) -> Self {
        Self::with_config(mode, mode.config())
    }

    pub fn with_config(mode: ChartMode, config: ChartConfig) -> Self {
        Self {
            mode,
            config,
            layers: default_layer_stack(),
            frame: ChartFrame::empty(config.width, config.height),
            scales: None,
            hover: None,
            drawn_version: None,
        }
    }

    pub fn mode(&self) -> ChartMode {
        self.mode
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn frame(&self) -> &ChartFrame {
        &self.frame
    }

    pub fn state(&self) -> RenderState {
        self.frame.state
    }

    pub fn scales(&self) -> Option<&(TimeScale, LinearScale)> {
        self.scales.as_ref()
    }

    /// Full clear-and-redraw: Empty -> Scaled -> Drawn.
    /// Empty input ends in a drawn frame with axes over the default domain and no line.
    pub fn on_data_changed(&mut self, points: &[Point]) -> &ChartFrame {
        // Empty
        self.frame.clear();
        self.scales = None;
        self.hover = None;

        // Scaled
        let (x, y) = compute_scales(points, &self.config);
        self.scales = Some((x, y));
        self.frame.state = RenderState::Scaled;

        // Drawn
        let (x_axis, y_axis) =
            draw_axes(&x, &y, self.mode.x_tick_format(), self.config.tick_count);
        let ctx = LayerContext {
            points,
            x: &x,
            y: &y,
            config: &self.config,
            x_axis: &x_axis,
            y_axis: &y_axis,
        };
        for layer in &self.layers {
            layer.draw(&mut self.frame, &ctx);
        }

        if self.config.hover_tracking && !points.is_empty() {
            self.hover = Some(attach_hover_tracking(points, &x, &y, self.frame.bounds()));
        }
        self.frame.state = RenderState::Drawn;

        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_render_passes {
            log::info!(
                "[render] {:?}: {} points, x {:?}, y {:?}",
                self.mode,
                points.len(),
                x.domain(),
                y.domain()
            );
        }

        &self.frame
    }

    /// Redraw only if the data source moved past the version last drawn.
    /// Any number of pushes between two calls collapse into one redraw.
    pub fn redraw_if_changed<F>(&mut self, version: u64, points: F) -> bool
    where
        F: FnOnce() -> Vec<Point>,
    {
        if self.drawn_version == Some(version) {
            return false;
        }
        let points = points();
        self.on_data_changed(&points);
        self.drawn_version = Some(version);
        true
    }

    /// Forget the drawn version so the next `redraw_if_changed` always redraws
    /// (e.g. after the selected symbol changes).
    pub fn invalidate(&mut self) {
        self.drawn_version = None;
    }

    /// Focus for the current pointer; always `None` when hover tracking is off.
    pub fn hover(&self, pointer: Option<Pos>) -> Option<Focus> {
        self.hover.as_ref()?.track(pointer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::curve::PathCommand;
    use crate::chart::frame::StrokePaint;

    #[test]
    fn test_history_chart_two_points() {
        let mut renderer = ChartRenderer::new(ChartMode::History);
        let points = vec![
            Point::new(1_700_000_000_000, 100.5),
            Point::new(1_700_086_400_000, 102.3),
        ];
        renderer.on_data_changed(&points);
        let frame = renderer.frame();
        assert_eq!(frame.state, RenderState::Drawn);

        let line = frame.line.as_ref().expect("line drawn");
        assert_eq!(line.path.segment_count(), 1);

        let (x, y) = renderer.scales().unwrap();
        let expected_from = Pos::new(x.apply(points[0].time_ms), y.apply(points[0].value));
        let expected_to = Pos::new(x.apply(points[1].time_ms), y.apply(points[1].value));
        assert_eq!(line.path.commands[0], PathCommand::MoveTo(expected_from));
        assert_eq!(line.path.commands[1], PathCommand::LineTo(expected_to));
        assert!(matches!(line.paint, StrokePaint::VerticalGradient { .. }));

        let x_axis = frame.x_axis.as_ref().unwrap();
        assert!(!x_axis.ticks.is_empty());
        for label in x_axis.labels() {
            assert!(!label.contains(':'), "clock label {}", label);
            assert!(label.starts_with("Nov "), "unexpected label {}", label);
        }
        assert!(!frame.gridlines.is_empty());
    }

    #[test]
    fn test_realtime_axis_uses_clock_time() {
        let mut renderer = ChartRenderer::new(ChartMode::RealTime);
        let t0 = 1_700_000_000_000;
        let points: Vec<Point> = (0..10)
            .map(|i| Point::new(t0 + i * 1_000, 67_000.0 + i as f64))
            .collect();
        let frame = renderer.on_data_changed(&points);
        let labels = frame.x_axis.as_ref().unwrap().labels();
        assert!(labels.iter().all(|l| l.matches(':').count() == 2));
        assert!(frame.gridlines.is_empty());
        assert!(frame.y_axis.as_ref().unwrap().labels().iter().all(|l| l.starts_with('$')));
    }

    #[test]
    fn test_empty_input_draws_axes_only() {
        let mut renderer = ChartRenderer::new(ChartMode::RealTime);
        renderer.on_data_changed(&[Point::new(0, 1.0), Point::new(1_000, 2.0)]);
        assert!(renderer.frame().has_line());

        renderer.on_data_changed(&[]);
        assert_eq!(renderer.state(), RenderState::Drawn);
        let frame = renderer.frame();
        assert!(!frame.has_line());

        let (x, y) = renderer.scales().expect("default scales");
        let (x0, x1) = x.domain();
        let (y0, y1) = y.domain();
        assert!(x0.is_finite() && x1.is_finite() && x0 < x1);
        assert!(y0.is_finite() && y1.is_finite() && y0 < y1);

        let x_axis = frame.x_axis.as_ref().expect("x axis drawn");
        let y_axis = frame.y_axis.as_ref().expect("y axis drawn");
        assert!(!x_axis.ticks.is_empty());
        assert_eq!(y_axis.labels().first().copied(), Some("$0.00"));
        assert!(renderer.hover(Some(Pos::new(400.0, 200.0))).is_none());
    }

    #[test]
    fn test_empty_history_keeps_gridlines_without_hover() {
        let mut renderer = ChartRenderer::new(ChartMode::History);
        renderer.on_data_changed(&[]);
        let frame = renderer.frame();
        assert!(!frame.gridlines.is_empty());
        assert!(frame.x_axis.is_some() && frame.y_axis.is_some());
        assert!(renderer.hover(Some(Pos::new(400.0, 200.0))).is_none());
    }

    #[test]
    fn test_basic_chart_end_to_end() {
        let mut renderer = ChartRenderer::new(ChartMode::Basic);
        let points = vec![
            Point::new(1_700_000_000_000, 100.5),
            Point::new(1_700_086_400_000, 102.3),
        ];
        let frame = renderer.on_data_changed(&points);
        assert_eq!(frame.state, RenderState::Drawn);
        assert_eq!((frame.width, frame.height), (600.0, 400.0));

        let line = frame.line.as_ref().expect("line drawn");
        assert_eq!(line.path.segment_count(), 1);
        assert!(matches!(line.paint, StrokePaint::Solid(_)));
        assert!(frame.gridlines.is_empty());

        let y_labels = frame.y_axis.as_ref().unwrap().labels();
        assert_eq!(y_labels.first().copied(), Some("$0.00"));

        let x_labels = frame.x_axis.as_ref().unwrap().labels();
        assert!(!x_labels.is_empty());
        for label in x_labels {
            assert!(!label.contains(':'), "clock label {}", label);
            assert!(label.starts_with("Nov "), "unexpected label {}", label);
        }

        let (_, y) = renderer.scales().unwrap();
        assert_eq!(y.domain().0, 0.0);
        assert!(renderer.hover(Some(Pos::new(300.0, 200.0))).is_none());
    }

    #[test]
    fn test_redraw_is_coalesced_by_version() {
        let mut renderer = ChartRenderer::new(ChartMode::RealTime);
        let mut calls = 0;
        assert!(renderer.redraw_if_changed(3, || {
            calls += 1;
            vec![Point::new(0, 1.0)]
        }));
        assert!(!renderer.redraw_if_changed(3, || {
            calls += 1;
            Vec::new()
        }));
        assert_eq!(calls, 1);

        renderer.invalidate();
        assert!(renderer.redraw_if_changed(3, Vec::new));
    }

    #[test]
    fn test_hover_only_in_history_mode() {
        let points = vec![Point::new(0, 10.0), Point::new(10_000, 20.0)];

        let mut live = ChartRenderer::new(ChartMode::RealTime);
        live.on_data_changed(&points);
        let (x, _) = *live.scales().unwrap();
        assert!(live.hover(Some(Pos::new(x.apply(2_000), 100.0))).is_none());

        let mut history = ChartRenderer::new(ChartMode::History);
        history.on_data_changed(&points);
        let (x, _) = *history.scales().unwrap();
        let focus = history.hover(Some(Pos::new(x.apply(2_000), 100.0))).unwrap();
        assert_eq!(focus.point, points[0]);
        let focus = history.hover(Some(Pos::new(x.apply(8_000), 100.0))).unwrap();
        assert_eq!(focus.point, points[1]);
        assert!(history.hover(Some(Pos::new(x.range().0 - 5.0, 100.0))).is_none());
    }
}
