//! Fetch one coin's history and write it as an SVG line chart.
//! Usage: history_svg <coin-id> [days] [out.svg]

use anyhow::{Context, Result};
use std::path::PathBuf;

use coin_chart::ChartMode;
use coin_chart::config::FEEDS;
use coin_chart::export::{history_svg, write_svg};

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let mut args = std::env::args().skip(1);
    let coin_id = args.next().unwrap_or_else(|| FEEDS.ws.default_assets[0].to_string());
    let days = match args.next() {
        Some(raw) => raw
            .parse::<u32>()
            .with_context(|| format!("Invalid day count {:?}", raw))?,
        None => FEEDS.rest.default_history_days,
    };
    let out = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(format!("{}_{}d.svg", coin_id, days)));

    let svg = history_svg(&coin_id, days, ChartMode::History, true)?;
    write_svg(&out, &svg)?;
    println!("✅ {} ({}d) written to {:?}", coin_id, days, out);
    Ok(())
}
