use serde::{Deserialize, Serialize};
use std::path::Path;
use truernd::RetryPolicy;

use crate::error::CliError;

/// Parameters for the `selftest` suite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelfTestConfig {
    /// Values drawn per width in the throughput check.
    pub iterations: usize,
    /// Bytes written by the buffer fill check.
    pub buffer_size: usize,
    /// 64-bit values drawn by the uniqueness check.
    pub sample_count: usize,
    /// Exact duplicates tolerated among `sample_count` draws.
    pub max_duplicates: usize,
    /// Values drawn and printed by each scalar batch check.
    pub batch_size: usize,
    pub retry: RetryPolicy,
}

impl Default for SelfTestConfig {
    fn default() -> Self {
        Self {
            iterations: 1000,
            buffer_size: 256,
            sample_count: 100,
            max_duplicates: 1,
            batch_size: 10,
            retry: RetryPolicy::default(),
        }
    }
}

impl SelfTestConfig {
    pub fn from_yaml(text: &str) -> Result<Self, CliError> {
        let config: Self = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, CliError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml(&text)
    }

    /// Validate that every check has something to do.
    pub fn validate(&self) -> Result<(), CliError> {
        let sizes = [
            ("iterations", self.iterations),
            ("buffer_size", self.buffer_size),
            ("sample_count", self.sample_count),
            ("batch_size", self.batch_size),
        ];
        if let Some((name, _)) = sizes.iter().find(|(_, value)| *value == 0) {
            return Err(CliError::Config(format!("{name} must be at least 1")));
        }
        self.retry.validate()?;
        Ok(())
    }
}
