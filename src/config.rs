use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::FixtureError;
use crate::options::Options;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct FixtureConfig {
    /// Total workers, the last one being the array worker.
    #[serde(default = "default_num_threads")]
    pub num_threads: usize,
    /// Iterations per counter worker.
    #[serde(default = "default_iterations")]
    pub iterations: usize,
    #[serde(default = "default_array")]
    pub array: Vec<i64>,
    #[serde(default = "default_doubled_prefix")]
    pub doubled_prefix: usize,
    #[serde(default = "default_hold_delay_us")]
    pub hold_delay_us: u64,
    #[serde(default = "default_post_release_delay_us")]
    pub post_release_delay_us: u64,
    #[serde(default = "default_between_locks_delay_us")]
    pub between_locks_delay_us: u64,
}

impl Default for FixtureConfig {
    fn default() -> Self {
        Self {
            num_threads: default_num_threads(),
            iterations: default_iterations(),
            array: default_array(),
            doubled_prefix: default_doubled_prefix(),
            hold_delay_us: default_hold_delay_us(),
            post_release_delay_us: default_post_release_delay_us(),
            between_locks_delay_us: default_between_locks_delay_us(),
        }
    }
}

impl FixtureConfig {
    /// Reads a TOML workload. The path is always user-supplied, so a missing
    /// file is an error rather than a silent fallback to defaults.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        let config: FixtureConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;
        Ok(config)
    }

    /// Command-line style options win over file values.
    pub fn apply_options(&mut self, options: &Options) {
        if let Some(threads) = options.threads {
            self.num_threads = threads;
        }
        if let Some(iterations) = options.iterations {
            self.iterations = iterations;
        }
    }

    pub fn validate(&self) -> Result<(), FixtureError> {
        if self.num_threads < 2 {
            return Err(FixtureError::InvalidConfig(format!(
                "num_threads must be at least 2, got {}",
                self.num_threads
            )));
        }
        if self.doubled_prefix > self.array.len() {
            return Err(FixtureError::InvalidConfig(format!(
                "doubled_prefix {} exceeds array length {}",
                self.doubled_prefix,
                self.array.len()
            )));
        }
        self.checked_sums().ok_or_else(|| {
            FixtureError::InvalidConfig("array sum or doubled prefix overflows i64".to_string())
        })?;
        Ok(())
    }

    /// Initial and final array sums, or `None` if either overflows.
    fn checked_sums(&self) -> Option<(i64, i64)> {
        let initial = self
            .array
            .iter()
            .try_fold(0i64, |acc, v| acc.checked_add(*v))?;
        let mut final_sum = 0i64;
        for (i, v) in self.array.iter().enumerate() {
            let v = if i < self.doubled_prefix { v.checked_mul(2)? } else { *v };
            final_sum = final_sum.checked_add(v)?;
        }
        Some((initial, final_sum))
    }

    pub fn counter_workers(&self) -> usize {
        self.num_threads.saturating_sub(1)
    }
}

fn default_num_threads() -> usize {
    4
}

fn default_iterations() -> usize {
    5
}

fn default_array() -> Vec<i64> {
    (1..=10).collect()
}

fn default_doubled_prefix() -> usize {
    5
}

fn default_hold_delay_us() -> u64 {
    100
}

fn default_post_release_delay_us() -> u64 {
    1_000
}

fn default_between_locks_delay_us() -> u64 {
    10_000
}
