// Domain types and value objects
pub mod coin;
pub mod sample;

// Re-export commonly used types
pub use coin::Coin;
pub use sample::{HistoryPoint, Point, Sample, points_from_history, points_from_samples};
