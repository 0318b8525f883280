//! Pluggable pauses used by the workers to widen interleavings.
use std::thread;
use std::time::Duration;

use crate::config::FixtureConfig;

/// Where in a worker a pause happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DelayPoint {
    /// Counter worker, while mutex1 is held.
    Hold,
    /// Counter worker, after mutex1 is released.
    PostRelease,
    /// Array worker, holding mutex1 and not yet mutex2.
    BetweenLocks,
}

pub trait Delay: Sync {
    fn pause(&self, point: DelayPoint);
}

/// Never blocks.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoDelay;

impl Delay for NoDelay {
    fn pause(&self, _point: DelayPoint) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SleepDelay {
    pub hold: Duration,
    pub post_release: Duration,
    pub between_locks: Duration,
}

impl SleepDelay {
    pub fn duration(&self, point: DelayPoint) -> Duration {
        match point {
            DelayPoint::Hold => self.hold,
            DelayPoint::PostRelease => self.post_release,
            DelayPoint::BetweenLocks => self.between_locks,
        }
    }
}

impl Delay for SleepDelay {
    fn pause(&self, point: DelayPoint) {
        let duration = self.duration(point);
        if !duration.is_zero() {
            thread::sleep(duration);
        }
    }
}

impl From<&FixtureConfig> for SleepDelay {
    fn from(config: &FixtureConfig) -> Self {
        SleepDelay {
            hold: Duration::from_micros(config.hold_delay_us),
            post_release: Duration::from_micros(config.post_release_delay_us),
            between_locks: Duration::from_micros(config.between_locks_delay_us),
        }
    }
}
