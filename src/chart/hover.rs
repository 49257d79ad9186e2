use crate::chart::axis::format_currency;
use crate::chart::frame::{Pos, Rect};
use crate::chart::scale::{LinearScale, TimeScale};
use crate::domain::Point;
use crate::utils::time_utils::format_tooltip_date;

/// Focus marker position plus tooltip for the point nearest the pointer.
#[derive(Debug, Clone, PartialEq)]
pub struct Focus {
    pub point: Point,
    pub position: Pos,
    pub tooltip: String,
}

/// Pointer-to-point lookup for one drawn frame.
#[derive(Debug, Clone)]
pub struct HoverTracker {
    points: Vec<Point>,
    x: TimeScale,
    y: LinearScale,
    area: Rect,
}

pub fn attach_hover_tracking(
    points: &[Point],
    x: &TimeScale,
    y: &LinearScale,
    area: Rect,
) -> HoverTracker {
    HoverTracker {
        points: points.to_vec(),
        x: *x,
        y: *y,
        area,
    }
}

/// First index whose time is >= `time_ms`
pub fn bisect_left(points: &[Point], time_ms: f64) -> usize {
    points.partition_point(|p| (p.time_ms as f64) < time_ms)
}

/// Closer of the two points bracketing `time_ms` (ties go to the earlier one).
/// `None` before the first or after the last point.
pub fn nearest_point(points: &[Point], time_ms: f64) -> Option<Point> {
    let first = points.first()?;
    let last = points.last()?;
    if time_ms < first.time_ms as f64 || time_ms > last.time_ms as f64 {
        return None;
    }

    let i = bisect_left(points, time_ms);
    if i == 0 {
        return Some(*first);
    }
    let d0 = points[i - 1];
    let d1 = *points.get(i)?;
    if time_ms - d0.time_ms as f64 > d1.time_ms as f64 - time_ms {
        Some(d1)
    } else {
        Some(d0)
    }
}

pub fn tooltip_text(point: &Point) -> String {
    format!(
        "Date: {}, Price: {}",
        format_tooltip_date(point.time_ms),
        format_currency(point.value)
    )
}

impl HoverTracker {
    /// `None` pointer means the pointer left the canvas.
    pub fn track(&self, pointer: Option<Pos>) -> Option<Focus> {
        let pointer = pointer.filter(|p| self.area.contains(*p))?;
        let time = self.x.invert(pointer.x);
        let point = nearest_point(&self.points, time)?;
        Some(Focus {
            point,
            position: Pos::new(self.x.apply(point.time_ms), self.y.apply(point.value)),
            tooltip: tooltip_text(&point),
        })
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_points() -> Vec<Point> {
        vec![Point::new(0, 10.0), Point::new(10, 20.0)]
    }

    #[test]
    fn test_nearest_picks_closer_in_time() {
        let points = two_points();
        assert_eq!(nearest_point(&points, 3.0), Some(Point::new(0, 10.0)));
        assert_eq!(nearest_point(&points, 7.0), Some(Point::new(10, 20.0)));
    }

    #[test]
    fn test_tie_goes_to_earlier_point() {
        assert_eq!(nearest_point(&two_points(), 5.0), Some(Point::new(0, 10.0)));
    }

    #[test]
    fn test_outside_range_is_hidden() {
        let points = two_points();
        assert_eq!(nearest_point(&points, -5.0), None);
        assert_eq!(nearest_point(&points, 10.5), None);
        assert_eq!(nearest_point(&[], 0.0), None);
    }

    #[test]
    fn test_endpoints_are_selectable() {
        let points = two_points();
        assert_eq!(nearest_point(&points, 0.0), Some(Point::new(0, 10.0)));
        assert_eq!(nearest_point(&points, 10.0), Some(Point::new(10, 20.0)));
    }

    #[test]
    fn test_track_through_scales() {
        let points = two_points();
        let x = TimeScale::new((0.0, 10.0), (100.0, 200.0));
        let y = LinearScale::new((0.0, 20.0), (300.0, 100.0));
        let tracker = attach_hover_tracking(&points, &x, &y, Rect::from_size(400.0, 400.0));

        // pixel 130 -> t = 3
        let focus = tracker.track(Some(Pos::new(130.0, 50.0))).unwrap();
        assert_eq!(focus.point, Point::new(0, 10.0));
        assert_eq!(focus.position, Pos::new(100.0, 200.0));
        assert_eq!(focus.tooltip, "Date: 01/01/1970, Price: $10.00");

        // pixel 50 -> t = -5, before the first point
        assert!(tracker.track(Some(Pos::new(50.0, 50.0))).is_none());
        // pointer left the canvas
        assert!(tracker.track(None).is_none());
        assert!(tracker.track(Some(Pos::new(500.0, 50.0))).is_none());
    }
}
