//! Lock A 持有者计数探针.
use std::sync::atomic::{AtomicUsize, Ordering};

/// Counts how many tasks currently hold a lock and the highest count ever seen.
#[derive(Debug, Default)]
pub struct HolderProbe {
    current: AtomicUsize,
    max: AtomicUsize,
    acquisitions: AtomicUsize,
}

impl HolderProbe {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn enter(&self) {
        let now = self.current.fetch_add(1, Ordering::SeqCst) + 1;
        self.max.fetch_max(now, Ordering::SeqCst);
        self.acquisitions.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn exit(&self) {
        self.current.fetch_sub(1, Ordering::SeqCst);
    }

    pub fn current_holders(&self) -> usize {
        self.current.load(Ordering::SeqCst)
    }

    /// Highest number of simultaneous holders observed so far.
    pub fn max_holders(&self) -> usize {
        self.max.load(Ordering::SeqCst)
    }

    pub fn acquisitions(&self) -> usize {
        self.acquisitions.load(Ordering::Relaxed)
    }
}
