//! File persistence configuration

use std::path::PathBuf;

/// Directory for cached history responses
pub const HISTORY_CACHE_DIR: &str = "history_cache";

/// Version stamp written into every cache file; bump when `HistoryCacheFile` changes shape
pub const HISTORY_CACHE_VERSION: u32 = 1;

/// Cached history older than this is treated as stale
pub const HISTORY_CACHE_MAX_AGE_SEC: i64 = 60 * 60; // 1 hour

/// Path for saving/loading the viewer's UI state
pub const APP_STATE_PATH: &str = ".coin_chart_state.json";

/// Example: "history_cache/bitcoin_30d_v1.bin"
pub fn history_cache_path(coin_id: &str, days: u32) -> PathBuf {
    PathBuf::from(HISTORY_CACHE_DIR).join(format!(
        "{}_{}d_v{}.bin",
        coin_id, days, HISTORY_CACHE_VERSION
    ))
}
