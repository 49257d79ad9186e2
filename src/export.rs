//! Headless rendering: draw a chart without a window and serialise it as SVG.

use anyhow::{Context, Result, bail};
use std::path::Path;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use crate::chart::{ChartMode, ChartRenderer, frame_to_svg};
use crate::data::{PriceStream, fetch_history_blocking};
use crate::domain::{points_from_history, points_from_samples};

/// Fetch history for `coin_id` and draw it in a history-style mode.
pub fn history_svg(coin_id: &str, days: u32, mode: ChartMode, prefer_api: bool) -> Result<String> {
    if mode.is_live() {
        bail!("{} charts are drawn from the live stream, not history", mode.label());
    }
    let (history, source) = fetch_history_blocking(coin_id, days, prefer_api)?;
    log::info!("Drawing {} points from {}", history.len(), source);

    let mut renderer = ChartRenderer::new(mode);
    let frame = renderer.on_data_changed(&points_from_history(&history));
    Ok(frame_to_svg(frame, None))
}

/// Listen to the live stream for `duration`, redrawing on every push,
/// then return the last drawn frame.
pub fn live_svg(assets: Vec<String>, coin_id: &str, duration: Duration) -> Result<String> {
    let mut stream = PriceStream::connect(assets)?;
    let (tx, rx) = mpsc::channel::<()>();
    let subscription = stream.subscribe(Box::new(move |_snapshot| {
        let _ = tx.send(());
    }));

    let mut renderer = ChartRenderer::new(ChartMode::RealTime);
    renderer.on_data_changed(&[]);
    let deadline = Instant::now() + duration;
    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            break;
        }
        match rx.recv_timeout(remaining) {
            // Pushes that queued up while drawing collapse into one redraw
            Ok(()) => {
                while rx.try_recv().is_ok() {}
                renderer.redraw_if_changed(stream.version(), || {
                    points_from_samples(&stream.select_series(coin_id))
                });
            }
            Err(mpsc::RecvTimeoutError::Timeout) => break,
            Err(mpsc::RecvTimeoutError::Disconnected) => break,
        }
    }

    subscription.unsubscribe();
    stream.close();
    log::info!(
        "Live capture finished: {} samples buffered, status {}",
        stream.snapshot().len(),
        stream.status().label()
    );
    Ok(frame_to_svg(renderer.frame(), None))
}

pub fn write_svg(path: &Path, svg: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    std::fs::write(path, svg).with_context(|| format!("Failed to write {}", path.display()))?;
    log::info!("✅ Chart written to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_svg_rejects_live_mode() {
        assert!(history_svg("bitcoin", 30, ChartMode::RealTime, false).is_err());
    }

    #[test]
    fn test_write_svg_creates_parent() {
        let dir = std::env::temp_dir().join(format!("coin_chart_svg_{}", std::process::id()));
        let path = dir.join("nested").join("chart.svg");
        write_svg(&path, "<svg/>").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "<svg/>");
        let _ = std::fs::remove_dir_all(dir);
    }
}
