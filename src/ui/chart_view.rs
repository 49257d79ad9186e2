use colorgrad::Gradient;
use eframe::egui::{self, Align2, Color32, FontId, Painter, Pos2, Sense, Stroke, Ui};

use crate::chart::axis::{Axis, AxisOrientation};
use crate::chart::frame::StrokePaint;
use crate::chart::{ChartFrame, ChartRenderer, Focus, Pos};
use crate::config::PLOT_CONFIG;
use crate::ui::config::UI_CONFIG;
use crate::ui::utils::to_color32;

/// Maps frame pixels onto the allocated screen rect
struct CanvasTransform {
    origin: Pos2,
}

impl CanvasTransform {
    fn to_screen(&self, p: Pos) -> Pos2 {
        Pos2::new(self.origin.x + p.x as f32, self.origin.y + p.y as f32)
    }

    fn to_canvas(&self, p: Pos2) -> Pos {
        Pos::new((p.x - self.origin.x) as f64, (p.y - self.origin.y) as f64)
    }
}

/// Paints the renderer's current frame and, when hover tracking is on,
/// the focus marker for the pointer. Returns the focus that was drawn.
pub fn show_chart(ui: &mut Ui, renderer: &ChartRenderer) -> Option<Focus> {
    let frame = renderer.frame();
    let size = egui::vec2(frame.width as f32, frame.height as f32);
    let (response, painter) = ui.allocate_painter(size, Sense::hover());
    let canvas = CanvasTransform {
        origin: response.rect.min,
    };

    painter.rect_filled(response.rect, 0.0, to_color32(PLOT_CONFIG.background));
    paint_frame(&painter, &canvas, frame);

    let pointer = response.hover_pos().map(|p| canvas.to_canvas(p));
    let focus = renderer.hover(pointer);
    if let Some(focus) = &focus {
        paint_focus(&painter, &canvas, focus);
    }
    focus
}

fn paint_frame(painter: &Painter, canvas: &CanvasTransform, frame: &ChartFrame) {
    let grid_stroke = Stroke::new(1.0, to_color32(PLOT_CONFIG.grid_color));
    for line in &frame.gridlines {
        painter.line_segment(
            [canvas.to_screen(line.from), canvas.to_screen(line.to)],
            grid_stroke,
        );
    }

    if let Some(styled) = &frame.line {
        let points: Vec<Pos2> = styled
            .path
            .flatten(UI_CONFIG.curve_flatten_steps)
            .into_iter()
            .map(|p| canvas.to_screen(p))
            .collect();
        let width = styled.width as f32;

        match &styled.paint {
            StrokePaint::Solid(color) => {
                painter.add(egui::Shape::line(points, Stroke::new(width, to_color32(*color))));
            }
            StrokePaint::VerticalGradient { from_y, to_y, stops } => {
                paint_gradient_line(painter, canvas, &points, width, (*from_y, *to_y), stops);
            }
        }
    }

    // Domain lines fade when gridlines carry the structure
    let domain_color = if frame.gridlines.is_empty() {
        PLOT_CONFIG.axis_color
    } else {
        PLOT_CONFIG.axis_domain_color
    };
    for axis in [&frame.x_axis, &frame.y_axis].into_iter().flatten() {
        paint_axis(painter, canvas, axis, to_color32(domain_color));
    }
}

fn paint_gradient_line(
    painter: &Painter,
    canvas: &CanvasTransform,
    points: &[Pos2],
    width: f32,
    (from_y, to_y): (f64, f64),
    stops: &[&str],
) {
    let gradient = match colorgrad::GradientBuilder::new()
        .html_colors(stops)
        .build::<colorgrad::LinearGradient>()
    {
        Ok(g) => g,
        Err(e) => {
            log::warn!("⚠️ Invalid line gradient {:?}: {}", stops, e);
            painter.add(egui::Shape::line(
                points.to_vec(),
                Stroke::new(width, to_color32(PLOT_CONFIG.line_color)),
            ));
            return;
        }
    };

    let top = canvas.origin.y as f64 + from_y;
    let span = to_y - from_y;
    for pair in points.windows(2) {
        let mid_y = (pair[0].y + pair[1].y) as f64 / 2.0;
        let t = if span == 0.0 {
            0.0
        } else {
            ((mid_y - top) / span).clamp(0.0, 1.0)
        };
        let rgba = gradient.at(t as f32).to_rgba8();
        let color = Color32::from_rgb(rgba[0], rgba[1], rgba[2]);
        painter.line_segment([pair[0], pair[1]], Stroke::new(width, color));
    }
}

fn paint_axis(painter: &Painter, canvas: &CanvasTransform, axis: &Axis, domain_color: Color32) {
    let (a, b) = axis.domain_line();
    painter.line_segment(
        [canvas.to_screen(a), canvas.to_screen(b)],
        Stroke::new(1.0, domain_color),
    );

    let tick_stroke = Stroke::new(1.0, to_color32(PLOT_CONFIG.axis_color));
    let font = FontId::proportional(PLOT_CONFIG.tick_label_font_size as f32);
    let label_color = to_color32(PLOT_CONFIG.tick_label_color);
    let size = PLOT_CONFIG.tick_size;

    for tick in &axis.ticks {
        let (from, to, label_pos, anchor) = match axis.orientation {
            AxisOrientation::Bottom => (
                Pos::new(tick.position, axis.offset),
                Pos::new(tick.position, axis.offset + size),
                Pos::new(tick.position, axis.offset + size + 3.0),
                Align2::CENTER_TOP,
            ),
            AxisOrientation::Left => (
                Pos::new(axis.offset, tick.position),
                Pos::new(axis.offset - size, tick.position),
                Pos::new(axis.offset - size - 3.0, tick.position),
                Align2::RIGHT_CENTER,
            ),
        };
        painter.line_segment([canvas.to_screen(from), canvas.to_screen(to)], tick_stroke);
        painter.text(
            canvas.to_screen(label_pos),
            anchor,
            &tick.label,
            font.clone(),
            label_color,
        );
    }
}

fn paint_focus(painter: &Painter, canvas: &CanvasTransform, focus: &Focus) {
    let center = canvas.to_screen(focus.position);
    let radius = PLOT_CONFIG.focus_radius as f32;
    painter.circle_filled(center, radius, to_color32(PLOT_CONFIG.focus_fill));
    painter.circle_stroke(
        center,
        radius,
        Stroke::new(
            PLOT_CONFIG.focus_stroke_width as f32,
            to_color32(PLOT_CONFIG.focus_stroke),
        ),
    );

    let (dx, dy) = UI_CONFIG.tooltip_offset;
    let anchor = center + egui::vec2(dx, dy);
    let galley = painter.layout_no_wrap(
        focus.tooltip.clone(),
        FontId::proportional(12.0),
        Color32::WHITE,
    );
    let rect = egui::Rect::from_min_size(anchor, galley.size()).expand(4.0);
    painter.rect_filled(rect, 4.0, Color32::from_black_alpha(200));
    painter.galley(anchor, galley, Color32::WHITE);
}
