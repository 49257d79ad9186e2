//! History and coin-list fetching, with a local cache in front of the REST API.

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::config::{FEEDS, history_cache_path};
use crate::data::cache_file::HistoryCacheFile;
use crate::domain::{Coin, HistoryPoint};
use crate::utils::time_utils::now_timestamp_ms;

#[async_trait]
pub trait HistorySource: Send + Sync {
    async fn fetch_history(&self, coin_id: &str, days: u32) -> Result<Vec<HistoryPoint>>;

    /// Identifies which source produced the data
    fn signature(&self) -> &'static str;
}

/// Try each source in order; the first success wins.
pub async fn get_history_async(
    sources: &[Box<dyn HistorySource>],
    coin_id: &str,
    days: u32,
) -> Result<(Vec<HistoryPoint>, &'static str)> {
    for source in sources {
        match source.fetch_history(coin_id, days).await {
            Ok(points) => return Ok((points, source.signature())),
            Err(e) => log::info!("History source {} failed: {:#}", source.signature(), e),
        }
    }
    Err(anyhow!("All history sources failed for {} ({}d)", coin_id, days))
}

#[derive(Debug, Deserialize)]
struct MarketChartResponse {
    prices: Vec<(f64, f64)>,
}

/// Parse a market_chart body into points, keeping the server's order.
pub fn parse_market_chart(body: &str) -> Result<Vec<HistoryPoint>> {
    let response: MarketChartResponse =
        serde_json::from_str(body).context("Unexpected market_chart payload")?;
    Ok(response
        .prices
        .into_iter()
        .map(|(ts, price)| HistoryPoint::from((ts as i64, price)))
        .collect())
}

pub fn parse_coin_list(body: &str) -> Result<Vec<Coin>> {
    serde_json::from_str(body).context("Unexpected coin list payload")
}

#[derive(Clone)]
pub struct CoinGeckoClient {
    http: reqwest::Client,
    base_url: String,
}

impl CoinGeckoClient {
    pub fn new() -> Result<Self> {
        Self::with_base_url(FEEDS.rest.base_url)
    }

    pub fn with_base_url(base_url: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(FEEDS.rest.timeout_ms))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn market_chart_url(&self, coin_id: &str, days: u32) -> String {
        format!(
            "{}/coins/{}/market_chart?vs_currency={}&days={}",
            self.base_url, coin_id, FEEDS.rest.quote_currency, days
        )
    }

    pub fn coin_list_url(&self) -> String {
        format!(
            "{}/coins/markets?vs_currency={}&order=market_cap_desc&per_page={}&page=1&sparkline=false",
            self.base_url, FEEDS.rest.quote_currency, FEEDS.rest.coin_list_page_size
        )
    }

    async fn get_text(&self, url: &str) -> Result<String> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .with_context(|| format!("Request to {} failed", url))?
            .error_for_status()
            .with_context(|| format!("Bad status from {}", url))?;
        response
            .text()
            .await
            .with_context(|| format!("Failed to read body from {}", url))
    }

    pub async fn fetch_market_chart(&self, coin_id: &str, days: u32) -> Result<Vec<HistoryPoint>> {
        let body = self.get_text(&self.market_chart_url(coin_id, days)).await?;
        parse_market_chart(&body)
    }

    /// Top coins by market cap
    pub async fn fetch_coin_list(&self) -> Result<Vec<Coin>> {
        let body = self.get_text(&self.coin_list_url()).await?;
        parse_coin_list(&body)
    }
}

#[async_trait]
impl HistorySource for CoinGeckoClient {
    async fn fetch_history(&self, coin_id: &str, days: u32) -> Result<Vec<HistoryPoint>> {
        let points = self.fetch_market_chart(coin_id, days).await?;
        let cache = HistoryCacheFile::new(coin_id, days, now_timestamp_ms(), points.clone());
        let path = history_cache_path(coin_id, days);
        if let Err(e) = cache.save_to_path(&path) {
            log::warn!("⚠️ Could not write history cache: {:#}", e);
        } else {
            #[cfg(debug_assertions)]
            if DEBUG_FLAGS.print_history_cache {
                log::info!("Wrote {} points to {}", points.len(), path.display());
            }
        }
        Ok(points)
    }

    fn signature(&self) -> &'static str {
        "CoinGecko API"
    }
}

/// Serves history from the on-disk cache written by earlier API fetches.
pub struct CachedHistory;

#[async_trait]
impl HistorySource for CachedHistory {
    async fn fetch_history(&self, coin_id: &str, days: u32) -> Result<Vec<HistoryPoint>> {
        let path = history_cache_path(coin_id, days);
        let cache = HistoryCacheFile::load_from_path(&path)?;
        cache.check_validity(coin_id, days)?;
        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_history_cache {
            log::info!("Read {} points from {}", cache.points.len(), path.display());
        }
        Ok(cache.points)
    }

    fn signature(&self) -> &'static str {
        "Local Cache"
    }
}

/// Local cache first unless `prefer_api` is set.
pub fn history_sources(prefer_api: bool) -> Result<Vec<Box<dyn HistorySource>>> {
    let api: Box<dyn HistorySource> = Box::new(CoinGeckoClient::new()?);
    let cache: Box<dyn HistorySource> = Box::new(CachedHistory);
    Ok(if prefer_api {
        vec![api, cache]
    } else {
        vec![cache, api]
    })
}

pub async fn fetch_history(
    coin_id: &str,
    days: u32,
    prefer_api: bool,
) -> Result<(Vec<HistoryPoint>, &'static str)> {
    let sources = history_sources(prefer_api)?;
    let (points, signature) = get_history_async(&sources, coin_id, days).await?;
    log::info!(
        "Loaded {} history points for {} ({}d) from {}",
        points.len(),
        coin_id,
        days,
        signature
    );
    Ok((points, signature))
}

/// Blocking wrapper for callers without a runtime (CLI export, UI promise threads).
pub fn fetch_history_blocking(
    coin_id: &str,
    days: u32,
    prefer_api: bool,
) -> Result<(Vec<HistoryPoint>, &'static str)> {
    let rt = tokio::runtime::Runtime::new().context("Failed to create runtime")?;
    rt.block_on(fetch_history(coin_id, days, prefer_api))
}

pub fn fetch_coin_list_blocking() -> Result<Vec<Coin>> {
    let rt = tokio::runtime::Runtime::new().context("Failed to create runtime")?;
    rt.block_on(async { CoinGeckoClient::new()?.fetch_coin_list().await })
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Failing;
    struct Fixed(Vec<HistoryPoint>);

    #[async_trait]
    impl HistorySource for Failing {
        async fn fetch_history(&self, _: &str, _: u32) -> Result<Vec<HistoryPoint>> {
            Err(anyhow!("offline"))
        }
        fn signature(&self) -> &'static str {
            "failing"
        }
    }

    #[async_trait]
    impl HistorySource for Fixed {
        async fn fetch_history(&self, _: &str, _: u32) -> Result<Vec<HistoryPoint>> {
            Ok(self.0.clone())
        }
        fn signature(&self) -> &'static str {
            "fixed"
        }
    }

    #[test]
    fn test_parse_market_chart() {
        let points =
            parse_market_chart(r#"{"prices":[[1700000000000,100.5],[1700086400000,102.3]],"market_caps":[]}"#)
                .unwrap();
        assert_eq!(
            points,
            vec![
                HistoryPoint::from((1_700_000_000_000, 100.5)),
                HistoryPoint::from((1_700_086_400_000, 102.3)),
            ]
        );
    }

    #[test]
    fn test_parse_market_chart_rejects_garbage() {
        assert!(parse_market_chart(r#"{"error":"rate limited"}"#).is_err());
        assert!(parse_market_chart("<html>").is_err());
    }

    #[test]
    fn test_parse_coin_list_ignores_extra_fields() {
        let coins = parse_coin_list(
            r#"[{"id":"bitcoin","symbol":"btc","name":"Bitcoin","current_price":67000.0}]"#,
        )
        .unwrap();
        assert_eq!(coins[0].label(), "Bitcoin (BTC)");
    }

    #[test]
    fn test_urls() {
        let client = CoinGeckoClient::with_base_url("https://example.test/api/").unwrap();
        assert_eq!(
            client.market_chart_url("bitcoin", 30),
            "https://example.test/api/coins/bitcoin/market_chart?vs_currency=usd&days=30"
        );
        assert!(client.coin_list_url().contains("order=market_cap_desc&per_page=100&page=1"));
    }

    #[test]
    fn test_source_chain_falls_through() {
        let sources: Vec<Box<dyn HistorySource>> = vec![
            Box::new(Failing),
            Box::new(Fixed(vec![HistoryPoint::from((1, 2.0))])),
        ];
        let rt = tokio::runtime::Runtime::new().unwrap();
        let (points, signature) = rt.block_on(get_history_async(&sources, "bitcoin", 30)).unwrap();
        assert_eq!(signature, "fixed");
        assert_eq!(points.len(), 1);

        let only_failing: Vec<Box<dyn HistorySource>> = vec![Box::new(Failing)];
        assert!(rt.block_on(get_history_async(&only_failing, "bitcoin", 30)).is_err());
    }
}
