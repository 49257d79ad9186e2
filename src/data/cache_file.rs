use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::Path;

use crate::config::{HISTORY_CACHE_MAX_AGE_SEC, HISTORY_CACHE_VERSION};
use crate::domain::HistoryPoint;
use crate::utils::time_utils::how_many_seconds_ago;

/// One coin's history response as stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryCacheFile {
    pub version: u32,
    pub coin_id: String,
    pub days: u32,
    pub fetched_at_ms: i64,
    pub points: Vec<HistoryPoint>,
}

impl HistoryCacheFile {
    pub fn new(coin_id: &str, days: u32, fetched_at_ms: i64, points: Vec<HistoryPoint>) -> Self {
        Self {
            version: HISTORY_CACHE_VERSION,
            coin_id: coin_id.to_string(),
            days,
            fetched_at_ms,
            points,
        }
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open history cache {}", path.display()))?;
        let reader = BufReader::new(file);
        let cache: HistoryCacheFile = bincode::deserialize_from(reader)
            .with_context(|| format!("Failed to decode history cache {}", path.display()))?;
        Ok(cache)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create cache directory {}", parent.display())
            })?;
        }
        let file = File::create(path)
            .with_context(|| format!("Failed to create history cache {}", path.display()))?;
        let writer = BufWriter::new(file);
        bincode::serialize_into(writer, self)
            .with_context(|| format!("Failed to write history cache {}", path.display()))?;
        Ok(())
    }

    /// Reject caches written by another format version, for another request, or too long ago.
    pub fn check_validity(&self, coin_id: &str, days: u32) -> Result<()> {
        self.check_validity_at(coin_id, days, how_many_seconds_ago(self.fetched_at_ms))
    }

    fn check_validity_at(&self, coin_id: &str, days: u32, age_secs: i64) -> Result<()> {
        if self.version != HISTORY_CACHE_VERSION {
            bail!(
                "Cache version mismatch: file has v{}, expected v{}",
                self.version,
                HISTORY_CACHE_VERSION
            );
        }
        if self.coin_id != coin_id || self.days != days {
            bail!(
                "Cache holds {} ({}d), wanted {} ({}d)",
                self.coin_id,
                self.days,
                coin_id,
                days
            );
        }
        if age_secs > HISTORY_CACHE_MAX_AGE_SEC {
            bail!(
                "Cache is {}s old (max {}s)",
                age_secs,
                HISTORY_CACHE_MAX_AGE_SEC
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cache() -> HistoryCacheFile {
        HistoryCacheFile::new(
            "bitcoin",
            30,
            1_700_000_000_000,
            vec![
                HistoryPoint::from((1_700_000_000_000, 100.5)),
                HistoryPoint::from((1_700_086_400_000, 102.3)),
            ],
        )
    }

    #[test]
    fn test_save_then_load() {
        let path = std::env::temp_dir()
            .join(format!("coin_chart_cache_test_{}", std::process::id()))
            .join("bitcoin_30d.bin");
        let original = cache();
        original.save_to_path(&path).unwrap();
        let loaded = HistoryCacheFile::load_from_path(&path).unwrap();
        assert_eq!(loaded.coin_id, "bitcoin");
        assert_eq!(loaded.points, original.points);
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let path = std::env::temp_dir().join("coin_chart_definitely_missing.bin");
        assert!(HistoryCacheFile::load_from_path(&path).is_err());
    }

    #[test]
    fn test_validity_rules() {
        let c = cache();
        assert!(c.check_validity_at("bitcoin", 30, 10).is_ok());
        assert!(c.check_validity_at("bitcoin", 30, HISTORY_CACHE_MAX_AGE_SEC + 1).is_err());
        assert!(c.check_validity_at("ethereum", 30, 10).is_err());
        assert!(c.check_validity_at("bitcoin", 7, 10).is_err());

        let mut old = cache();
        old.version = HISTORY_CACHE_VERSION + 1;
        assert!(old.check_validity_at("bitcoin", 30, 10).is_err());
    }
}
