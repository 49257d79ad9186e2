//! Endpoints and client settings for the public price feeds.

/// Configuration for the CoinGecko REST client
pub struct RestConfig {
    pub base_url: &'static str,
    pub quote_currency: &'static str,
    pub timeout_ms: u64,
    /// Page size for the coin list (ordered by market cap)
    pub coin_list_page_size: u32,
    pub default_history_days: u32,
}

/// Configuration for the CoinCap price socket
pub struct WsConfig {
    pub prices_base_url: &'static str,
    /// Maximum reconnection delay (seconds)
    pub max_reconnect_delay_sec: u64,
    /// Initial reconnection delay (seconds)
    pub initial_reconnect_delay_sec: u64,
    /// Assets subscribed when none are given on the command line
    pub default_assets: &'static [&'static str],
}

/// The Master Feed Configuration
pub struct FeedConfig {
    pub rest: RestConfig,
    pub ws: WsConfig,
}

pub const FEEDS: FeedConfig = FeedConfig {
    rest: RestConfig {
        base_url: "https://api.coingecko.com/api/v3",
        quote_currency: "usd",
        timeout_ms: 10_000,
        coin_list_page_size: 100,
        default_history_days: 30,
    },
    ws: WsConfig {
        prices_base_url: "wss://ws.coincap.io/prices?assets=",
        max_reconnect_delay_sec: 300, // 5 minutes
        initial_reconnect_delay_sec: 1,
        default_assets: &["bitcoin", "ethereum", "solana", "cardano", "dogecoin"],
    },
};
