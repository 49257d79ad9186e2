use eframe::egui::{Color32, RichText, Ui};

use crate::data::ConnectionStatus;
use crate::ui::config::UI_CONFIG;

/// Extension trait to add semantic styling methods directly to `egui::Ui`.
pub trait UiStyleExt {
    /// Small, gray text
    fn label_subdued(&mut self, text: impl Into<String>);

    /// Section header in the configured heading color
    fn label_header(&mut self, text: impl Into<String>);

    fn label_error(&mut self, text: impl Into<String>);

    /// Colored dot plus status name
    fn connection_badge(&mut self, status: ConnectionStatus);
}

pub fn status_color(status: ConnectionStatus) -> Color32 {
    match status {
        ConnectionStatus::Connected => UI_CONFIG.colors.status_connected,
        ConnectionStatus::Connecting => UI_CONFIG.colors.status_pending,
        ConnectionStatus::Disconnected | ConnectionStatus::Closed => {
            UI_CONFIG.colors.status_down
        }
    }
}

impl UiStyleExt for Ui {
    fn label_subdued(&mut self, text: impl Into<String>) {
        self.label(RichText::new(text).small().color(UI_CONFIG.colors.label));
    }

    fn label_header(&mut self, text: impl Into<String>) {
        let text = text.into().to_uppercase();
        self.label(RichText::new(text).color(UI_CONFIG.colors.heading).monospace());
    }

    fn label_error(&mut self, text: impl Into<String>) {
        self.label(RichText::new(text).color(UI_CONFIG.colors.status_down));
    }

    fn connection_badge(&mut self, status: ConnectionStatus) {
        let color = status_color(status);
        self.horizontal(|ui| {
            ui.spacing_mut().item_spacing.x = 4.0;
            ui.label(RichText::new("●").color(color));
            ui.label(RichText::new(status.label()).small().color(color));
        });
    }
}
