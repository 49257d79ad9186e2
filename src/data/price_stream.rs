#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::config::{CHART_PRESETS, FEEDS};
use crate::data::stream_hub::{SnapshotCallback, StreamHub, Subscription};
use crate::domain::Sample;
use crate::utils::time_utils::now_timestamp_ms;
use anyhow::{Context, Result, bail};
use futures::StreamExt;
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::JoinHandle;
use std::time::Duration;
use tokio::sync::watch;
use tokio_tungstenite::{connect_async, tungstenite::Message};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStatus {
    Connecting,
    Connected,
    Disconnected,
    Closed,
}

impl ConnectionStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ConnectionStatus::Connecting => "Connecting",
            ConnectionStatus::Connected => "Connected",
            ConnectionStatus::Disconnected => "Disconnected",
            ConnectionStatus::Closed => "Closed",
        }
    }
}

type SharedStatus = Arc<Mutex<ConnectionStatus>>;

fn set_status(status: &SharedStatus, value: ConnectionStatus) {
    let mut guard = status.lock().unwrap_or_else(PoisonError::into_inner);
    // Closed is terminal
    if *guard != ConnectionStatus::Closed {
        *guard = value;
    }
}

/// Owns one socket connection to the price feed and the buffer it fills.
/// Subscribes to all requested assets at once and reconnects automatically.
pub struct PriceStream {
    assets: Vec<String>,
    hub: Arc<StreamHub>,
    status: SharedStatus,
    shutdown_tx: watch::Sender<bool>,
    worker: Option<JoinHandle<()>>,
}

impl PriceStream {
    pub fn connect(assets: Vec<String>) -> Result<Self> {
        Self::connect_with_capacity(assets, CHART_PRESETS.buffer_capacity)
    }

    pub fn connect_with_capacity(assets: Vec<String>, capacity: usize) -> Result<Self> {
        let assets: Vec<String> = assets
            .iter()
            .map(|a| a.trim().to_lowercase())
            .filter(|a| !a.is_empty())
            .collect();
        if assets.is_empty() {
            bail!("No assets requested for the price stream");
        }

        log::info!(">>> PriceStream: Requesting {} assets: {:?}", assets.len(), assets);

        let hub = StreamHub::new(capacity);
        let status: SharedStatus = Arc::new(Mutex::new(ConnectionStatus::Connecting));
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        // Clone Arcs to move into the background thread
        let hub_bg = hub.clone();
        let status_bg = status.clone();
        let assets_bg = assets.clone();

        let worker = std::thread::Builder::new()
            .name("price-stream".into())
            .spawn(move || {
                let rt = match tokio::runtime::Runtime::new() {
                    Ok(rt) => rt,
                    Err(e) => {
                        log::error!("Failed to create price stream runtime: {}", e);
                        set_status(&status_bg, ConnectionStatus::Disconnected);
                        return;
                    }
                };
                rt.block_on(run_with_reconnect(assets_bg, hub_bg, status_bg, shutdown_rx));
            })
            .context("Failed to spawn price stream thread")?;

        Ok(Self {
            assets,
            hub,
            status,
            shutdown_tx,
            worker: Some(worker),
        })
    }

    pub fn assets(&self) -> &[String] {
        &self.assets
    }

    pub fn status(&self) -> ConnectionStatus {
        *self.status.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn subscribe(&self, callback: SnapshotCallback) -> Subscription {
        self.hub.subscribe(callback)
    }

    pub fn snapshot(&self) -> Vec<Sample> {
        self.hub.snapshot()
    }

    pub fn select_series(&self, symbol: &str) -> Vec<Sample> {
        self.hub.select_series(symbol)
    }

    pub fn version(&self) -> u64 {
        self.hub.version()
    }

    /// Stop the connection. After this returns no further sample lands in the buffer.
    pub fn close(&mut self) {
        if self.hub.close() {
            log::info!(">>> PriceStream: closing connection for {:?}", self.assets);
        }
        set_status(&self.status, ConnectionStatus::Closed);
        let _ = self.shutdown_tx.send(true);
        // The worker exits on its own once it sees the shutdown signal
        self.worker.take();
    }
}

impl Drop for PriceStream {
    fn drop(&mut self) {
        self.close();
    }
}

/// Wrapper that handles reconnection with exponential backoff
async fn run_with_reconnect(
    assets: Vec<String>,
    hub: Arc<StreamHub>,
    status: SharedStatus,
    mut shutdown_rx: watch::Receiver<bool>,
) {
    let url = build_prices_url(&assets);
    let mut reconnect_delay = FEEDS.ws.initial_reconnect_delay_sec;

    loop {
        if *shutdown_rx.borrow() {
            break;
        }
        set_status(&status, ConnectionStatus::Connecting);

        let outcome = tokio::select! {
            result = run_price_stream(&url, &hub, &status) => result,
            _ = shutdown_rx.changed() => break,
        };

        let delay = match outcome {
            Ok(()) => {
                #[cfg(debug_assertions)]
                if DEBUG_FLAGS.print_price_stream_updates {
                    log::info!("Price socket closed by server, reconnecting...");
                }
                reconnect_delay = FEEDS.ws.initial_reconnect_delay_sec;
                reconnect_delay
            }
            Err(e) => {
                log::error!("Price stream error: {:#}", e);
                set_status(&status, ConnectionStatus::Disconnected);
                let delay = reconnect_delay;
                reconnect_delay = (reconnect_delay * 2).min(FEEDS.ws.max_reconnect_delay_sec);
                delay
            }
        };

        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_price_stream_updates {
            log::info!("Reconnecting price stream in {} seconds...", delay);
        }

        tokio::select! {
            _ = tokio::time::sleep(Duration::from_secs(delay)) => {}
            _ = shutdown_rx.changed() => break,
        }
    }

    #[cfg(debug_assertions)]
    if DEBUG_FLAGS.print_price_stream_updates {
        log::info!("Price stream task finished");
    }
}

async fn run_price_stream(url: &str, hub: &StreamHub, status: &SharedStatus) -> Result<()> {
    #[cfg(debug_assertions)]
    if DEBUG_FLAGS.print_price_stream_updates {
        log::info!("Connecting to price socket: {}", url);
    }

    let (ws_stream, _) = connect_async(url)
        .await
        .with_context(|| format!("Failed to connect to {}", url))?;

    // Fresh connection, fresh buffer
    hub.reset();
    set_status(status, ConnectionStatus::Connected);
    log::info!("✓ Connected to price stream");

    let (_write, mut read) = ws_stream.split();

    while let Some(msg) = read.next().await {
        match msg {
            Ok(Message::Text(text)) => match parse_price_message(&text, now_timestamp_ms()) {
                Ok(batch) => {
                    #[cfg(debug_assertions)]
                    if DEBUG_FLAGS.print_price_stream_updates {
                        for sample in &batch {
                            log::info!("[price-stream] {} -> {:.6}", sample.symbol, sample.price);
                        }
                    }
                    hub.ingest(batch);
                }
                Err(e) => log::warn!("⚠️ Dropping price message: {:#}", e),
            },
            Ok(Message::Close(_)) => {
                set_status(status, ConnectionStatus::Disconnected);
                return Ok(());
            }
            Ok(_) => {} // Ping/Pong handled by tungstenite
            Err(e) => return Err(e).context("Price socket read failed"),
        }
    }

    set_status(status, ConnectionStatus::Disconnected);
    Ok(())
}

pub fn build_prices_url(assets: &[String]) -> String {
    format!("{}{}", FEEDS.ws.prices_base_url, assets.join(","))
}

/// Turn one `{"bitcoin": "67000.12", ...}` message into a batch stamped `now_ms`.
/// Entries whose price is not a finite number are dropped individually;
/// a message that is not a JSON object is rejected as a whole.
pub fn parse_price_message(text: &str, now_ms: i64) -> Result<Vec<Sample>> {
    let map: serde_json::Map<String, serde_json::Value> =
        serde_json::from_str(text).context("Price message is not a JSON object")?;

    let mut batch = Vec::with_capacity(map.len());
    for (symbol, value) in map {
        let parsed = match &value {
            serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
            serde_json::Value::Number(n) => n.as_f64(),
            _ => None,
        };
        match parsed {
            Some(price) if price.is_finite() => batch.push(Sample::new(now_ms, symbol, price)),
            _ => log::warn!("⚠️ Failed to parse price {} for {}", value, symbol),
        }
    }
    Ok(batch)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_price_message() {
        let batch =
            parse_price_message(r#"{"bitcoin":"67000.12","ethereum":"3500.5"}"#, 42).unwrap();
        assert_eq!(batch.len(), 2);
        assert!(batch.iter().all(|s| s.time_ms == 42));
        let btc = batch.iter().find(|s| s.symbol == "bitcoin").unwrap();
        assert!((btc.price - 67000.12).abs() < 1e-9);
    }

    #[test]
    fn test_malformed_entries_dropped_individually() {
        let batch = parse_price_message(
            r#"{"bitcoin":"not-a-number","ethereum":"3500.5","solana":null,"doge":0.12}"#,
            1,
        )
        .unwrap();
        let mut symbols: Vec<&str> = batch.iter().map(|s| s.symbol.as_str()).collect();
        symbols.sort();
        assert_eq!(symbols, vec!["doge", "ethereum"]);
    }

    #[test]
    fn test_non_json_message_rejected() {
        assert!(parse_price_message("hello", 1).is_err());
        assert!(parse_price_message("[1,2,3]", 1).is_err());
    }

    #[test]
    fn test_build_prices_url() {
        let url = build_prices_url(&["bitcoin".to_string(), "ethereum".to_string()]);
        assert_eq!(url, "wss://ws.coincap.io/prices?assets=bitcoin,ethereum");
    }

    #[test]
    fn test_connect_rejects_empty_asset_list() {
        assert!(PriceStream::connect(vec![" ".to_string()]).is_err());
    }

    #[test]
    fn test_closed_status_is_terminal() {
        let status: SharedStatus = Arc::new(Mutex::new(ConnectionStatus::Connected));
        set_status(&status, ConnectionStatus::Closed);
        set_status(&status, ConnectionStatus::Connecting);
        assert_eq!(*status.lock().unwrap(), ConnectionStatus::Closed);
    }
}
