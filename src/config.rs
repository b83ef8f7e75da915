//! Run configuration.

use crate::{
    address::GENERIC_PREFIX,
    constants::{DEFAULT_BLOCK_TIME_SECS, DEFAULT_CHUNK_SIZE, DEFAULT_SETTLE_DELAY},
    recipients::LoadError,
};
use serde::{Deserialize, Serialize};
use std::{path::Path, time::Duration};

/// Configuration for a distribution run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DistributionConfig {
    /// Token decimals of the target chain.
    pub decimals: u32,
    /// Maximum number of inner calls per atomic batch.
    pub chunk_size: usize,
    /// Expected block time, used for vesting schedule derivation.
    pub block_time_secs: u64,
    /// Seconds to wait after each confirmed chunk before the next submission.
    pub settle_delay_secs: u64,
    /// SS58 prefix used when rendering addresses.
    pub ss58_prefix: u16,
    /// Wrap every composed batch in a sudo call.
    pub sudo: bool,
}

impl Default for DistributionConfig {
    fn default() -> Self {
        Self {
            decimals: 18,
            chunk_size: DEFAULT_CHUNK_SIZE,
            block_time_secs: DEFAULT_BLOCK_TIME_SECS,
            settle_delay_secs: DEFAULT_SETTLE_DELAY.as_secs(),
            ss58_prefix: GENERIC_PREFIX,
            sudo: false,
        }
    }
}

impl DistributionConfig {
    /// Loads configuration from a JSON file.
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let file = std::fs::File::open(path).map_err(|source| LoadError::Io {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_reader(std::io::BufReader::new(file)).map_err(LoadError::from)
    }

    /// The settling delay as a [`Duration`].
    pub fn settle_delay(&self) -> Duration {
        Duration::from_secs(self.settle_delay_secs)
    }

    /// Sets the token decimals.
    pub fn with_decimals(mut self, decimals: u32) -> Self {
        self.decimals = decimals;
        self
    }

    /// Sets the batch chunk size.
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Sets the expected block time in seconds.
    pub fn with_block_time_secs(mut self, block_time_secs: u64) -> Self {
        self.block_time_secs = block_time_secs;
        self
    }

    /// Sets the settling delay in seconds.
    pub fn with_settle_delay_secs(mut self, settle_delay_secs: u64) -> Self {
        self.settle_delay_secs = settle_delay_secs;
        self
    }

    /// Sets sudo wrapping for every composed batch.
    pub fn with_sudo(mut self, sudo: bool) -> Self {
        self.sudo = sudo;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_constants() {
        let config = DistributionConfig::default();
        assert_eq!(config.chunk_size, 100);
        assert_eq!(config.block_time_secs, 12);
        assert_eq!(config.settle_delay(), Duration::from_secs(6));
        assert!(!config.sudo);
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config: DistributionConfig =
            serde_json::from_str(r#"{"chunkSize": 50, "sudo": true}"#).unwrap();
        assert_eq!(config.chunk_size, 50);
        assert!(config.sudo);
        assert_eq!(config.decimals, 18);
    }

    #[test]
    fn builders_override_fields() {
        let config = DistributionConfig::default()
            .with_decimals(12)
            .with_chunk_size(25)
            .with_settle_delay_secs(0)
            .with_sudo(true);
        assert_eq!(config.decimals, 12);
        assert_eq!(config.chunk_size, 25);
        assert_eq!(config.settle_delay(), Duration::ZERO);
        assert!(config.sudo);
    }
}
