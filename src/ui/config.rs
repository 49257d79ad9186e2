use eframe::egui::Color32;

/// UI Colors for the viewer chrome (the chart canvas uses PLOT_CONFIG)
#[derive(Clone, Copy, Default)]
pub struct UiColors {
    pub label: Color32,
    pub heading: Color32,
    pub side_panel: Color32,
    pub central_panel: Color32,
    pub status_connected: Color32,
    pub status_pending: Color32,
    pub status_down: Color32,
}

#[derive(Default, Clone, Copy)]
pub struct UiConfig {
    pub colors: UiColors,
    /// Spacing from the tooltip box to the focus marker
    pub tooltip_offset: (f32, f32),
    /// Sub-steps per cubic segment when painting curves
    pub curve_flatten_steps: usize,
    pub history_day_choices: &'static [u32],
}

pub static UI_CONFIG: UiConfig = UiConfig {
    colors: UiColors {
        label: Color32::GRAY,
        heading: Color32::YELLOW,
        side_panel: Color32::from_rgb(25, 25, 25),
        central_panel: Color32::from_rgb(40, 40, 40),
        status_connected: Color32::from_rgb(130, 200, 140),
        status_pending: Color32::from_rgb(255, 215, 0),
        status_down: Color32::from_rgb(255, 100, 100),
    },
    tooltip_offset: (10.0, -28.0),
    curve_flatten_steps: 8,
    history_day_choices: &[1, 7, 30, 90, 365],
};

/// User-facing strings
pub struct UiText {
    pub window_title: &'static str,
    pub mode_heading: &'static str,
    pub coin_heading: &'static str,
    pub range_heading: &'static str,
    pub loading_history: &'static str,
    pub loading_coins: &'static str,
    pub no_data: &'static str,
    pub last_update: &'static str,
}

pub const UI_TEXT: UiText = UiText {
    window_title: "Coin Chart",
    mode_heading: "Chart",
    coin_heading: "Coin",
    range_heading: "Range",
    loading_history: "Fetching history...",
    loading_coins: "Loading coin list...",
    no_data: "Waiting for data",
    last_update: "Last update",
};
