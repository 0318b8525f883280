use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Outcome of one fixture run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub initial_sum: i64,
    pub final_counter: u64,
    pub final_sum: i64,
    pub final_array: Vec<i64>,
    pub counter_workers: usize,
    pub iterations: usize,
    /// Most tasks ever seen holding mutex1 at once.
    pub max_lock_a_holders: usize,
    /// Every mutex1 acquisition, the coordinator's own reads included.
    pub lock_a_acquisitions: usize,
    pub elapsed: Duration,
}

impl RunReport {
    /// What the counter must read if no update was lost.
    pub fn expected_counter(&self) -> u64 {
        (self.counter_workers * self.iterations) as u64
    }

    pub fn to_json_string(&self) -> Result<String, ReportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write_json<P: AsRef<Path>>(&self, path: P) -> Result<(), ReportError> {
        let mut file = File::create(path)?;
        file.write_all(self.to_json_string()?.as_bytes())?;
        Ok(())
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Final counter: {}", self.final_counter)?;
        writeln!(f, "Final sum: {}", self.final_sum)
    }
}
