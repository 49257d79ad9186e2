use eframe::egui;
use poll_promise::Promise;

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::data::history::{fetch_coin_list_blocking, fetch_history_blocking};
use crate::domain::{Coin, HistoryPoint, points_from_history};
use crate::ui::app::{AppError, CoinChartApp, Selection};
use crate::utils::app_time::now;

pub(super) struct HistoryResult {
    pub(super) selection: Selection,
    pub(super) result: Result<(Vec<HistoryPoint>, &'static str), AppError>,
}

impl CoinChartApp {
    /// Start a history fetch when the shown data no longer matches the selection.
    pub(super) fn ensure_history(&mut self, ctx: &egui::Context) {
        if self.history_promise.is_some() {
            return;
        }
        if self.history_for.as_ref() == Some(&self.selection) {
            return;
        }
        if let Some(shown) = &self.history_for {
            if shown.coin_id == self.selection.coin_id
                && shown.history_days == self.selection.history_days
            {
                // Mode change only, the points are still good
                self.history_for = Some(self.selection.clone());
                return;
            }
        }

        let selection = self.selection.clone();
        let prefer_api = self.prefer_api;
        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_ui_interactions {
            log::info!(
                "Fetching {} days of history for {}",
                selection.history_days,
                selection.coin_id
            );
        }

        let repaint_ctx = ctx.clone();
        self.history_promise = Some(Promise::spawn_thread("history_fetch", move || {
            let result = fetch_history_blocking(&selection.coin_id, selection.history_days, prefer_api)
                .map_err(|e| AppError::HistoryUnavailable(format!("{:#}", e)));
            repaint_ctx.request_repaint();
            HistoryResult { selection, result }
        }));
    }

    pub(super) fn poll_history(&mut self, ctx: &egui::Context) {
        let Some(promise) = &self.history_promise else {
            return;
        };
        let Some(done) = promise.ready() else {
            ctx.request_repaint();
            return;
        };

        let selection = done.selection.clone();
        let result = done.result.clone();
        self.history_promise = None;

        match result {
            Ok((points, source)) => {
                self.history_points = points_from_history(&points);
                self.history_source = Some(source);
                self.last_error = None;
            }
            Err(e) => {
                log::error!("❌ {}", e);
                // No data: the chart degrades to an empty frame
                self.history_points.clear();
                self.history_source = None;
                self.last_error = Some(e);
            }
        }
        self.history_for = Some(selection);
        self.last_update = Some(now());
        if !self.selection.mode.is_live() {
            self.renderer.on_data_changed(&self.history_points);
        }
    }

    pub(super) fn start_coin_list_fetch(&mut self) {
        self.coin_list_promise = Some(Promise::spawn_thread("coin_list", || {
            fetch_coin_list_blocking().map_err(|e| AppError::CoinListUnavailable(format!("{:#}", e)))
        }));
    }

    pub(super) fn poll_coin_list(&mut self, ctx: &egui::Context) {
        let Some(promise) = &self.coin_list_promise else {
            return;
        };
        let Some(result) = promise.ready() else {
            ctx.request_repaint_after(std::time::Duration::from_millis(200));
            return;
        };

        match result {
            Ok(coins) if !coins.is_empty() => {
                log::info!("Loaded {} coins", coins.len());
                self.coins = merge_selected_coin(coins.clone(), &self.selection.coin_id);
            }
            Ok(_) => log::warn!("⚠️ Coin list came back empty, keeping defaults"),
            Err(e) => {
                log::warn!("⚠️ {}", e);
                self.last_error = Some(e.clone());
            }
        }
        self.coin_list_promise = None;
    }
}

/// Keep the current coin selectable even when it is outside the fetched list.
fn merge_selected_coin(mut coins: Vec<Coin>, selected: &str) -> Vec<Coin> {
    if !coins.iter().any(|c| c.id == selected) {
        coins.insert(0, Coin::from_id(selected));
    }
    coins
}
