// Price feeds, buffering and history caching
pub mod cache_file;
pub mod history;
pub mod price_stream;
pub mod stream_buffer;
pub mod stream_hub;

// Re-export commonly used types
pub use history::{CoinGeckoClient, HistorySource, fetch_history, fetch_history_blocking};
pub use price_stream::{ConnectionStatus, PriceStream};
pub use stream_buffer::StreamBuffer;
pub use stream_hub::{StreamHub, Subscription};
