//! Bodies of the two kinds of worker threads.
use log::debug;

use crate::concurrency::delay::{Delay, DelayPoint};
use crate::concurrency::locks::SharedState;
use crate::error::{LockName, Result};
use crate::status::{StatusLine, StatusSink};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorkerKind {
    Counter,
    Array,
}

/// Identity and workload of one worker. Owned by the coordinator, lent to the
/// worker for its whole lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskDescriptor {
    pub id: usize,
    pub iterations: usize,
    pub kind: WorkerKind,
}

impl TaskDescriptor {
    pub fn counter(id: usize, iterations: usize) -> Self {
        Self {
            id,
            iterations,
            kind: WorkerKind::Counter,
        }
    }

    pub fn array(id: usize) -> Self {
        Self {
            id,
            iterations: 1,
            kind: WorkerKind::Array,
        }
    }
}

/// Everything a worker touches besides its descriptor.
#[derive(Clone, Copy)]
pub struct WorkerContext<'a> {
    pub state: &'a SharedState,
    pub delay: &'a dyn Delay,
    pub sink: &'a dyn StatusSink,
    /// How many leading array elements the array worker doubles.
    pub doubled_prefix: usize,
}

impl WorkerContext<'_> {
    pub fn run(&self, task: &TaskDescriptor) -> Result<()> {
        debug!("worker {} ({:?}) started", task.id, task.kind);
        let result = match task.kind {
            WorkerKind::Counter => counter_worker(task, self),
            WorkerKind::Array => array_worker(task, self),
        };
        debug!("worker {} finished: {:?}", task.id, result);
        result
    }
}

pub fn counter_worker(task: &TaskDescriptor, ctx: &WorkerContext<'_>) -> Result<()> {
    for _ in 0..task.iterations {
        let mut counter = ctx.state.lock_counter()?;
        let local = counter.increment();
        ctx.delay.pause(DelayPoint::Hold);
        ctx.sink.emit(StatusLine::Counter {
            id: task.id,
            counter: *counter,
            local,
        });
        drop(counter);
        ctx.delay.pause(DelayPoint::PostRelease);
    }
    Ok(())
}

pub fn array_worker(task: &TaskDescriptor, ctx: &WorkerContext<'_>) -> Result<()> {
    let mut counter = ctx.state.lock_counter()?;
    ctx.sink.emit(StatusLine::Acquired {
        id: task.id,
        lock: LockName::Mutex1,
    });
    ctx.delay.pause(DelayPoint::BetweenLocks);

    let mut array = counter.lock_array()?;
    ctx.sink.emit(StatusLine::Acquired {
        id: task.id,
        lock: LockName::Mutex2,
    });
    for value in array.iter_mut().take(ctx.doubled_prefix) {
        *value *= 2;
    }

    drop(array);
    drop(counter);
    Ok(())
}
