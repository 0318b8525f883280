use std::fmt;

use thiserror::Error;

/// The two mutexes of the fixture, named the way the status lines print them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LockName {
    /// Lock A, guards the shared counter.
    Mutex1,
    /// Lock B, only ever taken while Lock A is held.
    Mutex2,
}

impl fmt::Display for LockName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LockName::Mutex1 => write!(f, "mutex1"),
            LockName::Mutex2 => write!(f, "mutex2"),
        }
    }
}

#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("failed to spawn worker {id}: {source}")]
    Spawn {
        id: usize,
        #[source]
        source: std::io::Error,
    },
    #[error("{0} is poisoned")]
    Poisoned(LockName),
    #[error("worker {id} panicked")]
    WorkerPanicked { id: usize },
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, FixtureError>;
