use eframe::egui::{Color32, Context, Ui, Visuals};

use crate::config::Rgba;
use crate::ui::config::UI_CONFIG;

/// Sets up custom visuals for the entire application
pub fn setup_custom_visuals(ctx: &Context) {
    let mut visuals = Visuals::dark();
    visuals.window_fill = UI_CONFIG.colors.central_panel;
    visuals.panel_fill = UI_CONFIG.colors.side_panel;
    visuals.widgets.noninteractive.fg_stroke.color = UI_CONFIG.colors.label;
    visuals.widgets.inactive.fg_stroke.color = UI_CONFIG.colors.label;
    visuals.widgets.hovered.fg_stroke.color = UI_CONFIG.colors.heading;
    ctx.set_visuals(visuals);
}

/// Creates a separator with standard spacing
pub fn spaced_separator(ui: &mut Ui) {
    ui.add_space(10.0);
    ui.separator();
    ui.add_space(10.0);
}

pub fn to_color32(c: Rgba) -> Color32 {
    Color32::from_rgba_unmultiplied(c.0, c.1, c.2, c.3)
}

/// Formats a price with precision scaled to its magnitude.
/// - Large (>=1000): 2 decimals
/// - Medium (1-1000): 4 decimals
/// - Small (<1): 5-8 decimals
pub fn format_price(price: f64) -> String {
    if price == 0.0 {
        return "$0.00".to_string();
    }
    let abs_price = price.abs();
    if abs_price >= 1000.0 {
        format!("${:.2}", price)
    } else if abs_price >= 1.0 {
        format!("${:.4}", price)
    } else if abs_price >= 0.01 {
        format!("${:.5}", price)
    } else {
        format!("${:.8}", price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_price_precision() {
        assert_eq!(format_price(67000.123), "$67000.12");
        assert_eq!(format_price(12.48291), "$12.4829");
        assert_eq!(format_price(0.123456), "$0.12346");
        assert_eq!(format_price(0.00000231), "$0.00000231");
        assert_eq!(format_price(0.0), "$0.00");
    }

    #[test]
    fn test_to_color32_keeps_alpha() {
        let c = to_color32(Rgba(204, 204, 204, 110));
        assert_eq!(c.a(), 110);
    }
}
