use serde::{Deserialize, Serialize};

/// One timestamped price observation for one symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub time_ms: i64,
    pub symbol: String,
    pub price: f64,
}

impl Sample {
    pub fn new(time_ms: i64, symbol: impl Into<String>, price: f64) -> Self {
        Self {
            time_ms,
            symbol: symbol.into(),
            price,
        }
    }
}

/// A `[timestamp_ms, price]` pair from the history endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistoryPoint {
    pub timestamp_ms: i64,
    pub price: f64,
}

impl From<(i64, f64)> for HistoryPoint {
    fn from((timestamp_ms, price): (i64, f64)) -> Self {
        Self {
            timestamp_ms,
            price,
        }
    }
}

/// The only point shape the renderer understands.
/// Stream samples and history pairs are converted here, at the edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub time_ms: i64,
    pub value: f64,
}

impl Point {
    pub fn new(time_ms: i64, value: f64) -> Self {
        Self { time_ms, value }
    }
}

impl From<&Sample> for Point {
    fn from(sample: &Sample) -> Self {
        Point::new(sample.time_ms, sample.price)
    }
}

impl From<HistoryPoint> for Point {
    fn from(hp: HistoryPoint) -> Self {
        Point::new(hp.timestamp_ms, hp.price)
    }
}

pub fn points_from_samples(samples: &[Sample]) -> Vec<Point> {
    samples.iter().map(Point::from).collect()
}

pub fn points_from_history(history: &[HistoryPoint]) -> Vec<Point> {
    history.iter().copied().map(Point::from).collect()
}
