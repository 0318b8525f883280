//! Shared state of the fixture and the guards that enforce the mutex1 -> mutex2 order.
//!
//! `mutex2` can only be reached through a live [`CounterGuard`], so every task
//! acquires the two locks in the same order and releases them in reverse.
use std::ops::{Deref, DerefMut};
use std::sync::{Mutex, MutexGuard};

use log::debug;

use crate::concurrency::probe::HolderProbe;
use crate::error::{FixtureError, LockName, Result};

/// Counter and array shared by every worker of a run.
#[derive(Debug)]
pub struct SharedState {
    /// Lock A.
    counter: Mutex<u64>,
    /// Lock B.
    array: Mutex<Vec<i64>>,
    probe: HolderProbe,
}

impl SharedState {
    pub fn new(array: Vec<i64>) -> Self {
        Self {
            counter: Mutex::new(0),
            array: Mutex::new(array),
            probe: HolderProbe::new(),
        }
    }

    /// Blocks until mutex1 is free and takes it.
    pub fn lock_counter(&self) -> Result<CounterGuard<'_>> {
        let guard = self
            .counter
            .lock()
            .map_err(|_| FixtureError::Poisoned(LockName::Mutex1))?;
        self.probe.enter();
        debug!("{} acquired by {:?}", LockName::Mutex1, current_name());
        Ok(CounterGuard { guard, state: self })
    }

    pub fn counter(&self) -> Result<u64> {
        Ok(*self.lock_counter()?)
    }

    /// Copies the array out under both locks.
    pub fn array_snapshot(&self) -> Result<Vec<i64>> {
        let mut counter = self.lock_counter()?;
        let array = counter.lock_array()?;
        Ok(array.to_vec())
    }

    pub fn probe(&self) -> &HolderProbe {
        &self.probe
    }
}

fn current_name() -> String {
    std::thread::current()
        .name()
        .unwrap_or("<unnamed>")
        .to_string()
}

/// Proof that mutex1 is held.
pub struct CounterGuard<'a> {
    guard: MutexGuard<'a, u64>,
    state: &'a SharedState,
}

impl<'a> CounterGuard<'a> {
    /// Bumps the counter and returns the value just written.
    pub fn increment(&mut self) -> u64 {
        *self.guard += 1;
        *self.guard
    }

    /// Takes mutex2 while mutex1 stays held. The returned guard borrows this
    /// one, so mutex2 is always released first.
    pub fn lock_array(&mut self) -> Result<ArrayGuard<'_>> {
        let guard = self
            .state
            .array
            .lock()
            .map_err(|_| FixtureError::Poisoned(LockName::Mutex2))?;
        debug!("{} acquired by {:?}", LockName::Mutex2, current_name());
        Ok(ArrayGuard { guard })
    }
}

impl Deref for CounterGuard<'_> {
    type Target = u64;

    fn deref(&self) -> &u64 {
        &self.guard
    }
}

impl Drop for CounterGuard<'_> {
    fn drop(&mut self) {
        // The probe is decremented before the mutex itself unlocks.
        self.state.probe.exit();
        debug!("{} released by {:?}", LockName::Mutex1, current_name());
    }
}

/// Holds mutex2; only obtainable from a [`CounterGuard`].
pub struct ArrayGuard<'a> {
    guard: MutexGuard<'a, Vec<i64>>,
}

impl Deref for ArrayGuard<'_> {
    type Target = [i64];

    fn deref(&self) -> &[i64] {
        &self.guard
    }
}

impl DerefMut for ArrayGuard<'_> {
    fn deref_mut(&mut self) -> &mut [i64] {
        &mut self.guard
    }
}

impl Drop for ArrayGuard<'_> {
    fn drop(&mut self) {
        debug!("{} released by {:?}", LockName::Mutex2, current_name());
    }
}
