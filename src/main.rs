#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

use anyhow::Result;
use clap::Parser;
use eframe::NativeOptions;
use std::path::{Path, PathBuf};
use std::time::Duration;

use coin_chart::config::{APP_STATE_PATH, FEEDS};
use coin_chart::export::{history_svg, live_svg, write_svg};
use coin_chart::ui::Selection;
use coin_chart::ui::config::UI_TEXT;
use coin_chart::{Cli, run_app};

fn run_headless(args: &Cli, out: &Path) -> Result<()> {
    let mut selection = Selection::default();
    if let Some(mode) = args.mode {
        selection.mode = mode;
    }
    if let Some(coin) = &args.coin {
        selection.coin_id = coin.to_lowercase();
    }
    let days = args.days.unwrap_or(FEEDS.rest.default_history_days);

    let svg = if selection.mode.is_live() {
        live_svg(
            selection.live_assets(&args.assets),
            &selection.coin_id,
            Duration::from_secs(args.duration_secs),
        )?
    } else {
        history_svg(&selection.coin_id, days, selection.mode, args.prefer_api)?
    };
    write_svg(out, &svg)
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args = Cli::parse();
    #[cfg(debug_assertions)]
    log::info!("Parsed arguments: {:?}", args);

    if let Some(out) = &args.svg_out {
        return run_headless(&args, out);
    }

    let options = NativeOptions {
        persistence_path: Some(PathBuf::from(APP_STATE_PATH)),
        ..Default::default()
    };

    eframe::run_native(
        UI_TEXT.window_title,
        options,
        Box::new(move |cc| Ok(run_app(cc, &args))),
    )
    .map_err(|e| anyhow::anyhow!("Viewer exited with error: {}", e))
}
