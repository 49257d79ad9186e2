// Native viewer: controls, status bar and the painted chart
pub mod app;
mod app_async;
pub mod chart_view;
pub mod config;
pub mod styles;
pub mod utils;

// Re-export main app
pub use app::{AppError, CoinChartApp, Selection};
pub use config::UI_CONFIG;
