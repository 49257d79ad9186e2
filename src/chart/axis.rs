use crate::chart::frame::Pos;
use crate::chart::scale::{LinearScale, TimeScale};
use crate::utils::time_utils::{format_calendar_date, format_clock_time};

/// How tick values are turned into labels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickFormat {
    /// `HH:MM:SS`
    ClockTime,
    /// `MMM DD`
    CalendarDate,
    /// `$1234.50`
    Currency,
}

impl TickFormat {
    pub fn format(&self, value: f64) -> String {
        match self {
            TickFormat::ClockTime => format_clock_time(value as i64),
            TickFormat::CalendarDate => format_calendar_date(value as i64),
            TickFormat::Currency => format_currency(value),
        }
    }
}

pub fn format_currency(value: f64) -> String {
    // Avoid "$-0.00"
    let value = if value.abs() < 0.005 { 0.0 } else { value };
    format!("${:.2}", value)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisOrientation {
    Bottom,
    Left,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub value: f64,
    /// Pixel position along the axis
    pub position: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Axis {
    pub orientation: AxisOrientation,
    /// Canvas y of a bottom axis, canvas x of a left axis
    pub offset: f64,
    /// Pixel extent of the domain line
    pub span: (f64, f64),
    pub ticks: Vec<Tick>,
}

impl Axis {
    pub fn labels(&self) -> Vec<&str> {
        self.ticks.iter().map(|t| t.label.as_str()).collect()
    }

    /// Endpoints of the domain line
    pub fn domain_line(&self) -> (Pos, Pos) {
        let (a, b) = self.span;
        match self.orientation {
            AxisOrientation::Bottom => (Pos::new(a, self.offset), Pos::new(b, self.offset)),
            AxisOrientation::Left => (Pos::new(self.offset, a), Pos::new(self.offset, b)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLine {
    pub from: Pos,
    pub to: Pos,
}

/// Bottom time axis plus left price axis, both anchored on the plot-area edges.
pub fn draw_axes(
    x: &TimeScale,
    y: &LinearScale,
    x_format: TickFormat,
    tick_count: usize,
) -> (Axis, Axis) {
    let x_ticks = x
        .ticks(tick_count)
        .into_iter()
        .map(|t| Tick {
            value: t as f64,
            position: x.apply(t),
            label: x_format.format(t as f64),
        })
        .collect();

    let y_ticks = y
        .ticks(tick_count)
        .into_iter()
        .map(|v| Tick {
            value: v,
            position: y.apply(v),
            label: TickFormat::Currency.format(v),
        })
        .collect();

    let bottom = Axis {
        orientation: AxisOrientation::Bottom,
        offset: y.range().0,
        span: x.range(),
        ticks: x_ticks,
    };
    let left = Axis {
        orientation: AxisOrientation::Left,
        offset: x.range().0,
        span: y.range(),
        ticks: y_ticks,
    };
    (bottom, left)
}

/// Vertical lines at x ticks and horizontal lines at y ticks, across the plot area.
pub fn gridlines(x_axis: &Axis, y_axis: &Axis) -> Vec<GridLine> {
    let (y_bottom, y_top) = y_axis.span;
    let (x_left, x_right) = x_axis.span;

    let vertical = x_axis.ticks.iter().map(|t| GridLine {
        from: Pos::new(t.position, y_bottom),
        to: Pos::new(t.position, y_top),
    });
    let horizontal = y_axis.ticks.iter().map(|t| GridLine {
        from: Pos::new(x_left, t.position),
        to: Pos::new(x_right, t.position),
    });
    vertical.chain(horizontal).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_labels() {
        assert_eq!(format_currency(1234.5), "$1234.50");
        assert_eq!(format_currency(-0.001), "$0.00");
        assert_eq!(TickFormat::Currency.format(0.2), "$0.20");
    }

    #[test]
    fn test_axes_are_anchored_on_plot_edges() {
        let t0: i64 = 1_700_000_000_000;
        let x = TimeScale::new((t0 as f64, (t0 + 60_000) as f64), (50.0, 770.0));
        let y = LinearScale::new((0.0, 100.0), (360.0, 20.0));
        let (bottom, left) = draw_axes(&x, &y, TickFormat::ClockTime, 5);

        assert_eq!(bottom.offset, 360.0);
        assert_eq!(left.offset, 50.0);
        assert!(bottom.labels().iter().all(|l| l.len() == 8 && l.matches(':').count() == 2));
        assert_eq!(
            left.labels(),
            vec!["$0.00", "$20.00", "$40.00", "$60.00", "$80.00", "$100.00"]
        );
        assert!(left.ticks.iter().all(|t| (20.0..=360.0).contains(&t.position)));
    }

    #[test]
    fn test_gridlines_match_ticks() {
        let x = TimeScale::new((0.0, 60_000.0), (50.0, 770.0));
        let y = LinearScale::new((0.0, 100.0), (360.0, 20.0));
        let (bottom, left) = draw_axes(&x, &y, TickFormat::ClockTime, 5);
        let grid = gridlines(&bottom, &left);
        assert_eq!(grid.len(), bottom.ticks.len() + left.ticks.len());
        assert!(grid.iter().take(bottom.ticks.len()).all(|g| g.from.x == g.to.x));
    }
}
