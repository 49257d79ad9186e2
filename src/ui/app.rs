use eframe::{Frame, egui};
use poll_promise::Promise;
use serde::{Deserialize, Serialize};
use std::fmt;
use strum::IntoEnumIterator;

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::Cli;
use crate::chart::{ChartMode, ChartRenderer};
use crate::config::FEEDS;
use crate::data::{PriceStream, Subscription};
use crate::domain::{Coin, Point, points_from_samples};
use crate::ui::app_async::HistoryResult;
use crate::ui::chart_view::show_chart;
use crate::ui::config::{UI_CONFIG, UI_TEXT};
use crate::ui::styles::UiStyleExt;
use crate::ui::utils::{format_price, setup_custom_visuals, spaced_separator};
use crate::utils::app_time::{AppInstant, age_label};

/// Error types for viewer operations
#[derive(Debug, Clone)]
pub enum AppError {
    /// History fetch failed for every source
    HistoryUnavailable(String),
    /// Coin list could not be fetched
    CoinListUnavailable(String),
    /// Socket owner could not be started
    StreamFailed(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::HistoryUnavailable(msg) => write!(f, "History unavailable: {}", msg),
            AppError::CoinListUnavailable(msg) => write!(f, "Coin list unavailable: {}", msg),
            AppError::StreamFailed(msg) => write!(f, "Price stream failed: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

/// What the user picked; the only state persisted between runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Selection {
    pub mode: ChartMode,
    pub coin_id: String,
    pub history_days: u32,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            mode: ChartMode::default(),
            coin_id: FEEDS.ws.default_assets[0].to_string(),
            history_days: FEEDS.rest.default_history_days,
        }
    }
}

impl Selection {
    /// Assets for the live socket: the defaults, any extras, then the selected coin
    pub fn live_assets(&self, extra: &[String]) -> Vec<String> {
        let mut assets: Vec<String> = Vec::new();
        let candidates = FEEDS
            .ws
            .default_assets
            .iter()
            .map(|s| s.to_string())
            .chain(extra.iter().map(|s| s.trim().to_lowercase()))
            .chain(std::iter::once(self.coin_id.clone()));
        for asset in candidates {
            if !asset.is_empty() && !assets.contains(&asset) {
                assets.push(asset);
            }
        }
        assets
    }
}

/// Live socket plus the subscription that wakes the UI on each push.
/// Field order matters: the subscription is released before the stream closes.
pub(super) struct LiveFeed {
    pub(super) _repaint: Subscription,
    pub(super) stream: PriceStream,
}

pub struct CoinChartApp {
    pub(super) selection: Selection,
    pub(super) prefer_api: bool,
    pub(super) extra_assets: Vec<String>,
    pub(super) renderer: ChartRenderer,
    pub(super) coins: Vec<Coin>,
    pub(super) coin_list_promise: Option<Promise<Result<Vec<Coin>, AppError>>>,
    pub(super) history_promise: Option<Promise<HistoryResult>>,
    /// Selection the displayed history belongs to
    pub(super) history_for: Option<Selection>,
    pub(super) history_points: Vec<Point>,
    pub(super) history_source: Option<&'static str>,
    pub(super) live: Option<LiveFeed>,
    pub(super) last_update: Option<AppInstant>,
    pub(super) last_error: Option<AppError>,
}

impl CoinChartApp {
    pub fn new(cc: &eframe::CreationContext<'_>, args: &Cli) -> Self {
        let mut selection: Selection = cc
            .storage
            .and_then(|storage| eframe::get_value(storage, eframe::APP_KEY))
            .unwrap_or_default();

        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_state_serde {
            log::info!("Restored selection: {:?}", selection);
        }

        // Command-line choices win over the persisted ones
        if let Some(mode) = args.mode {
            selection.mode = mode;
        }
        if let Some(coin) = &args.coin {
            selection.coin_id = coin.to_lowercase();
        }
        if let Some(days) = args.days {
            selection.history_days = days;
        }

        let mut app = Self::with_selection(selection, args.prefer_api);
        app.extra_assets = args.assets.clone();
        app.start_coin_list_fetch();
        app
    }

    pub fn with_selection(selection: Selection, prefer_api: bool) -> Self {
        let coins = FEEDS
            .ws
            .default_assets
            .iter()
            .map(|id| Coin::from_id(id))
            .collect();
        Self {
            renderer: ChartRenderer::new(selection.mode),
            selection,
            prefer_api,
            extra_assets: Vec::new(),
            coins,
            coin_list_promise: None,
            history_promise: None,
            history_for: None,
            history_points: Vec::new(),
            history_source: None,
            live: None,
            last_update: None,
            last_error: None,
        }
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    fn set_mode(&mut self, mode: ChartMode) {
        if mode == self.renderer.mode() {
            return;
        }
        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_ui_interactions {
            log::info!("Chart mode -> {:?}", mode);
        }
        self.selection.mode = mode;
        self.renderer = ChartRenderer::new(mode);
        if !mode.is_live() {
            // Leaving live mode discards the connection and its buffer
            self.live = None;
            if self.history_for.as_ref().is_some_and(|s| self.same_history(s)) {
                self.renderer.on_data_changed(&self.history_points);
            }
        }
    }

    /// History and Basic share fetched data; only coin and range matter.
    fn same_history(&self, other: &Selection) -> bool {
        other.coin_id == self.selection.coin_id && other.history_days == self.selection.history_days
    }

    fn sync_live_feed(&mut self, ctx: &egui::Context) {
        let wanted = self.selection.live_assets(&self.extra_assets);
        let needs_new = match &self.live {
            Some(feed) => feed.stream.assets() != wanted.as_slice(),
            None => true,
        };
        if !needs_new {
            return;
        }

        // Coin-set change: drop the old connection (and its buffer) first
        self.live = None;
        self.renderer.invalidate();

        match PriceStream::connect(wanted) {
            Ok(stream) => {
                let repaint_ctx = ctx.clone();
                let repaint = stream.subscribe(Box::new(move |_snapshot| {
                    repaint_ctx.request_repaint();
                }));
                self.live = Some(LiveFeed {
                    _repaint: repaint,
                    stream,
                });
            }
            Err(e) => {
                log::error!("Failed to start price stream: {:#}", e);
                self.last_error = Some(AppError::StreamFailed(e.to_string()));
            }
        }
    }

    fn refresh_live_chart(&mut self) {
        let Some(feed) = &self.live else {
            return;
        };
        let coin_id = &self.selection.coin_id;
        let stream = &feed.stream;
        let redrawn = self.renderer.redraw_if_changed(stream.version(), || {
            points_from_samples(&stream.select_series(coin_id))
        });
        if redrawn {
            self.last_update = Some(crate::utils::app_time::now());
        }
    }

    fn render_side_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::left("controls").min_width(180.0).show(ctx, |ui| {
            ui.label_header(UI_TEXT.mode_heading);
            let mut mode = self.selection.mode;
            for candidate in ChartMode::iter() {
                ui.radio_value(&mut mode, candidate, candidate.label());
            }
            self.set_mode(mode);

            spaced_separator(ui);
            ui.label_header(UI_TEXT.coin_heading);
            let current = self
                .coins
                .iter()
                .find(|c| c.id == self.selection.coin_id)
                .map(|c| c.label())
                .unwrap_or_else(|| Coin::from_id(&self.selection.coin_id).label());
            let mut coin_id = self.selection.coin_id.clone();
            egui::ComboBox::from_id_salt("coin_select")
                .selected_text(current)
                .show_ui(ui, |ui| {
                    for coin in &self.coins {
                        ui.selectable_value(&mut coin_id, coin.id.clone(), coin.label());
                    }
                });
            if coin_id != self.selection.coin_id {
                #[cfg(debug_assertions)]
                if DEBUG_FLAGS.print_ui_interactions {
                    log::info!("Coin -> {}", coin_id);
                }
                self.selection.coin_id = coin_id;
                self.renderer.invalidate();
            }
            if self.coin_list_promise.is_some() {
                ui.label_subdued(UI_TEXT.loading_coins);
            }

            if !self.selection.mode.is_live() {
                spaced_separator(ui);
                ui.label_header(UI_TEXT.range_heading);
                ui.horizontal_wrapped(|ui| {
                    for &days in UI_CONFIG.history_day_choices {
                        ui.selectable_value(&mut self.selection.history_days, days, format!("{}d", days));
                    }
                });
            }
        });
    }

    fn render_status_panel(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if let Some(feed) = &self.live {
                    ui.connection_badge(feed.stream.status());
                    if let Some(latest) = feed.stream.select_series(&self.selection.coin_id).last() {
                        ui.label(format_price(latest.price));
                    }
                } else if let Some(source) = self.history_source {
                    ui.label_subdued(format!("Source: {}", source));
                }
                if let Some(at) = self.last_update {
                    ui.label_subdued(format!("{}: {}", UI_TEXT.last_update, age_label(at)));
                }
                if let Some(err) = &self.last_error {
                    ui.label_error(err.to_string());
                }
            });
        });
    }

    fn render_central_panel(&self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.label_header(format!(
                "{} - {}",
                Coin::from_id(&self.selection.coin_id).name,
                self.selection.mode.label()
            ));
            if self.history_promise.is_some() {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label_subdued(UI_TEXT.loading_history);
                });
            } else if !self.renderer.frame().has_line() {
                ui.label_subdued(UI_TEXT.no_data);
            }
            egui::ScrollArea::both().show(ui, |ui| {
                show_chart(ui, &self.renderer);
            });
        });
    }
}

impl eframe::App for CoinChartApp {
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, &self.selection);
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.live = None;
        self.history_promise = None;
        self.coin_list_promise = None;
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        setup_custom_visuals(ctx);

        self.poll_coin_list(ctx);

        if self.selection.mode.is_live() {
            self.sync_live_feed(ctx);
            self.refresh_live_chart();
        } else {
            self.ensure_history(ctx);
            self.poll_history(ctx);
        }

        self.render_side_panel(ctx);
        self.render_status_panel(ctx);
        self.render_central_panel(ctx);

        // Keep "N s ago" ticking
        if self.last_update.is_some() {
            ctx.request_repaint_after(std::time::Duration::from_secs(1));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_live_assets_include_selected_coin_once() {
        let mut selection = Selection::default();
        let defaults = selection.live_assets(&[]);
        assert!(defaults.contains(&"bitcoin".to_string()));

        selection.coin_id = "ripple".into();
        let assets = selection.live_assets(&["Ripple".to_string(), "tron".to_string()]);
        assert_eq!(assets.len(), defaults.len() + 2);
        assert_eq!(assets.iter().filter(|a| a.as_str() == "ripple").count(), 1);
    }

    #[test]
    fn test_selection_restores_missing_fields() {
        let restored: Selection = serde_json::from_str(r#"{"coin_id":"ethereum"}"#).unwrap();
        assert_eq!(restored.coin_id, "ethereum");
        assert_eq!(restored.history_days, 30);
        assert_eq!(restored.mode, ChartMode::RealTime);
    }

    #[test]
    fn test_switching_between_history_modes_reuses_points() {
        let mut app = CoinChartApp::with_selection(
            Selection {
                mode: ChartMode::History,
                ..Selection::default()
            },
            false,
        );
        app.history_for = Some(app.selection.clone());
        app.history_points = vec![
            Point::new(1_700_000_000_000, 100.5),
            Point::new(1_700_086_400_000, 102.3),
        ];
        app.renderer.on_data_changed(&app.history_points);

        app.set_mode(ChartMode::Basic);
        assert_eq!(app.renderer.mode(), ChartMode::Basic);
        assert!(app.renderer.frame().has_line());
        assert!(app.live.is_none());
    }
}
