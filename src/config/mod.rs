//! Configuration module for the coin chart application.

pub mod chart;
pub mod feeds;

mod debug; // Private: files use crate::config::DEBUG_FLAGS
pub use debug::DEBUG_FLAGS;

pub mod persistence;
pub mod plot;

// Re-export commonly used items
pub use chart::{CHART_PRESETS, ChartConfig, Margins};
pub use feeds::FEEDS;
pub use persistence::{
    APP_STATE_PATH, HISTORY_CACHE_MAX_AGE_SEC, HISTORY_CACHE_VERSION, history_cache_path,
};
pub use plot::{PLOT_CONFIG, Rgba};
