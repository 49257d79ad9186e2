//! Serialise a drawn frame to a standalone SVG document.

use std::fmt::{self, Write};

use crate::chart::axis::{Axis, AxisOrientation};
use crate::chart::frame::{ChartFrame, StrokePaint};
use crate::chart::hover::Focus;
use crate::config::{PLOT_CONFIG, Rgba};

const GRADIENT_ID: &str = "line-gradient";

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn color_attr(c: Rgba) -> String {
    if c.3 == 255 {
        c.to_hex()
    } else {
        format!("rgba({},{},{},{:.3})", c.0, c.1, c.2, c.3 as f64 / 255.0)
    }
}

fn write_axis(out: &mut String, axis: &Axis, domain_color: Rgba) -> fmt::Result {
    let (a, b) = axis.domain_line();
    let tick = PLOT_CONFIG.tick_size;
    let font = PLOT_CONFIG.tick_label_font_size;
    let tick_color = color_attr(PLOT_CONFIG.axis_color);
    let label_color = color_attr(PLOT_CONFIG.tick_label_color);

    writeln!(out, r#"<g class="axis">"#)?;
    writeln!(
        out,
        r#"<line x1="{:.3}" y1="{:.3}" x2="{:.3}" y2="{:.3}" stroke="{}"/>"#,
        a.x,
        a.y,
        b.x,
        b.y,
        color_attr(domain_color)
    )?;
    for t in &axis.ticks {
        match axis.orientation {
            AxisOrientation::Bottom => {
                writeln!(
                    out,
                    r#"<line x1="{p:.3}" y1="{o:.3}" x2="{p:.3}" y2="{e:.3}" stroke="{c}"/>"#,
                    p = t.position,
                    o = axis.offset,
                    e = axis.offset + tick,
                    c = tick_color
                )?;
                writeln!(
                    out,
                    r#"<text x="{:.3}" y="{:.3}" font-size="{}" text-anchor="middle" fill="{}">{}</text>"#,
                    t.position,
                    axis.offset + tick + font,
                    font,
                    label_color,
                    escape(&t.label)
                )?;
            }
            AxisOrientation::Left => {
                writeln!(
                    out,
                    r#"<line x1="{o:.3}" y1="{p:.3}" x2="{e:.3}" y2="{p:.3}" stroke="{c}"/>"#,
                    p = t.position,
                    o = axis.offset,
                    e = axis.offset - tick,
                    c = tick_color
                )?;
                writeln!(
                    out,
                    r#"<text x="{:.3}" y="{:.3}" font-size="{}" text-anchor="end" dominant-baseline="middle" fill="{}">{}</text>"#,
                    axis.offset - tick - 3.0,
                    t.position,
                    font,
                    label_color,
                    escape(&t.label)
                )?;
            }
        }
    }
    writeln!(out, "</g>")
}

/// Full document for `frame`, with an optional focus marker and tooltip on top.
pub fn frame_to_svg(frame: &ChartFrame, focus: Option<&Focus>) -> String {
    let mut out = String::new();
    if let Err(e) = write_document(&mut out, frame, focus) {
        log::error!("Failed to serialise chart frame: {}", e);
    }
    out
}

fn write_document(out: &mut String, frame: &ChartFrame, focus: Option<&Focus>) -> fmt::Result {
    writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = frame.width,
        h = frame.height
    )?;
    writeln!(
        out,
        r#"<rect width="100%" height="100%" fill="{}"/>"#,
        color_attr(PLOT_CONFIG.background)
    )?;

    if let Some(line) = &frame.line {
        if let StrokePaint::VerticalGradient { from_y, to_y, stops } = &line.paint {
            writeln!(
                out,
                r#"<defs><linearGradient id="{}" gradientUnits="userSpaceOnUse" x1="0" y1="{}" x2="0" y2="{}">"#,
                GRADIENT_ID, from_y, to_y
            )?;
            let last = stops.len().saturating_sub(1).max(1) as f64;
            for (i, color) in stops.iter().enumerate() {
                writeln!(
                    out,
                    r#"<stop offset="{:.0}%" stop-color="{}"/>"#,
                    i as f64 / last * 100.0,
                    color
                )?;
            }
            writeln!(out, "</linearGradient></defs>")?;
        }
    }

    if !frame.gridlines.is_empty() {
        writeln!(
            out,
            r#"<g class="grid" stroke="{}" stroke-width="1">"#,
            color_attr(PLOT_CONFIG.grid_color)
        )?;
        for g in &frame.gridlines {
            writeln!(
                out,
                r#"<line x1="{:.3}" y1="{:.3}" x2="{:.3}" y2="{:.3}"/>"#,
                g.from.x, g.from.y, g.to.x, g.to.y
            )?;
        }
        writeln!(out, "</g>")?;
    }

    if let Some(line) = &frame.line {
        let stroke = match &line.paint {
            StrokePaint::Solid(c) => color_attr(*c),
            StrokePaint::VerticalGradient { .. } => format!("url(#{})", GRADIENT_ID),
        };
        writeln!(
            out,
            r#"<path d="{}" fill="none" stroke="{}" stroke-width="{}"/>"#,
            line.path.to_svg_d(),
            stroke,
            line.width
        )?;
    }

    // History charts draw a light domain line, the others the default black one
    let domain_color = if frame.gridlines.is_empty() {
        PLOT_CONFIG.axis_color
    } else {
        PLOT_CONFIG.axis_domain_color
    };
    if let Some(axis) = &frame.x_axis {
        write_axis(out, axis, domain_color)?;
    }
    if let Some(axis) = &frame.y_axis {
        write_axis(out, axis, domain_color)?;
    }

    if let Some(focus) = focus {
        writeln!(
            out,
            r#"<g class="focus"><circle cx="{:.3}" cy="{:.3}" r="{}" fill="{}" stroke="{}" stroke-width="{}"/>"#,
            focus.position.x,
            focus.position.y,
            PLOT_CONFIG.focus_radius,
            color_attr(PLOT_CONFIG.focus_fill),
            color_attr(PLOT_CONFIG.focus_stroke),
            PLOT_CONFIG.focus_stroke_width
        )?;
        writeln!(
            out,
            r#"<text x="{:.3}" y="{:.3}" font-size="12">{}</text></g>"#,
            focus.position.x + 8.0,
            focus.position.y - 8.0,
            escape(&focus.tooltip)
        )?;
    }

    writeln!(out, "</svg>")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::renderer::{ChartMode, ChartRenderer};
    use crate::domain::Point;

    #[test]
    fn test_history_svg_has_gradient_path_and_dates() {
        let mut renderer = ChartRenderer::new(ChartMode::History);
        renderer.on_data_changed(&[
            Point::new(1_700_000_000_000, 100.5),
            Point::new(1_700_086_400_000, 102.3),
        ]);
        let svg = frame_to_svg(renderer.frame(), None);
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(r#"id="line-gradient""#));
        assert!(svg.contains("stroke=\"url(#line-gradient)\""));
        assert_eq!(svg.matches("<path").count(), 1);
        assert!(svg.contains(">Nov 15<"));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_empty_frame_is_valid_document() {
        let renderer = ChartRenderer::new(ChartMode::RealTime);
        let svg = frame_to_svg(renderer.frame(), None);
        assert!(!svg.contains("<path"));
        assert!(svg.contains("</svg>"));
    }

    #[test]
    fn test_empty_data_document_has_axes_only() {
        let mut renderer = ChartRenderer::new(ChartMode::RealTime);
        renderer.on_data_changed(&[]);
        let svg = frame_to_svg(renderer.frame(), None);
        assert!(!svg.contains("<path"));
        assert_eq!(svg.matches(r#"<g class="axis">"#).count(), 2);
        assert!(svg.contains(">$0.00<"));
    }

    #[test]
    fn test_write_document_completes_every_group() {
        let mut renderer = ChartRenderer::new(ChartMode::History);
        renderer.on_data_changed(&[
            Point::new(1_700_000_000_000, 100.5),
            Point::new(1_700_086_400_000, 102.3),
        ]);
        let mut out = String::new();
        assert!(write_document(&mut out, renderer.frame(), None).is_ok());
        assert!(out.ends_with("</svg>\n"));
        assert_eq!(out.matches("<g ").count(), out.matches("</g>").count());

        let axis = renderer.frame().y_axis.as_ref().unwrap();
        let mut axis_out = String::new();
        assert!(write_axis(&mut axis_out, axis, PLOT_CONFIG.axis_color).is_ok());
        assert_eq!(axis_out.matches("<text").count(), axis.ticks.len());
        assert!(axis_out.ends_with("</g>\n"));
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("a<b & \"c\""), "a&lt;b &amp; &quot;c&quot;");
    }
}
