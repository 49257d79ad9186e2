#![allow(clippy::collapsible_if)]
#![allow(clippy::type_complexity)]

// Core modules
pub mod chart;
pub mod config;
pub mod data;
pub mod domain;
pub mod export;
pub mod ui;
pub mod utils;

// Re-export commonly used types
pub use chart::{ChartFrame, ChartMode, ChartRenderer};
pub use data::{PriceStream, StreamBuffer, Subscription};
pub use domain::{HistoryPoint, Point, Sample};
pub use ui::CoinChartApp;
pub use utils::app_time;

// CLI argument parsing
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Use API as primary source instead of the local history cache
    #[arg(long, default_value_t = false)]
    pub prefer_api: bool,

    /// Chart to show (overrides the saved choice)
    #[arg(long, value_enum)]
    pub mode: Option<ChartMode>,

    /// Coin id as used by the feeds, e.g. "bitcoin"
    #[arg(long)]
    pub coin: Option<String>,

    /// History range in days
    #[arg(long)]
    pub days: Option<u32>,

    /// Extra assets for the live stream, comma separated
    #[arg(long, value_delimiter = ',')]
    pub assets: Vec<String>,

    /// Render headless and write the chart here instead of opening a window
    #[arg(long)]
    pub svg_out: Option<PathBuf>,

    /// How long a headless real-time capture listens before writing
    #[arg(long, default_value_t = 30)]
    pub duration_secs: u64,
}

/// Main application entry point - creates the GUI app
pub fn run_app(cc: &eframe::CreationContext, args: &Cli) -> Box<dyn eframe::App> {
    Box::new(ui::CoinChartApp::new(cc, args))
}
