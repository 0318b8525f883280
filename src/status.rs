//! 工作线程输出的状态行.
//!
//! Lines are emitted without any ordering between threads; interleaving on
//! stdout is part of what the fixture exhibits.
use std::fmt;
use std::sync::{Mutex, PoisonError};

use crate::error::LockName;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusLine {
    Counter { id: usize, counter: u64, local: u64 },
    Acquired { id: usize, lock: LockName },
    InitialSum { sum: i64 },
}

impl fmt::Display for StatusLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusLine::Counter { id, counter, local } => {
                write!(f, "Thread {id}: counter = {counter}, local = {local}")
            }
            StatusLine::Acquired { id, lock } => write!(f, "Thread {id}: acquired {lock}"),
            StatusLine::InitialSum { sum } => write!(f, "Main thread: initial sum = {sum}"),
        }
    }
}

pub trait StatusSink: Sync {
    fn emit(&self, line: StatusLine);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutSink;

impl StatusSink for StdoutSink {
    fn emit(&self, line: StatusLine) {
        println!("{line}");
    }
}

/// Keeps every line in emission order.
#[derive(Debug, Default)]
pub struct RecordingSink {
    lines: Mutex<Vec<StatusLine>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<StatusLine> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl StatusSink for RecordingSink {
    fn emit(&self, line: StatusLine) {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_render_like_the_fixture_output() {
        let counter = StatusLine::Counter {
            id: 2,
            counter: 7,
            local: 7,
        };
        assert_eq!(counter.to_string(), "Thread 2: counter = 7, local = 7");

        let acquired = StatusLine::Acquired {
            id: 4,
            lock: LockName::Mutex2,
        };
        assert_eq!(acquired.to_string(), "Thread 4: acquired mutex2");

        let sum = StatusLine::InitialSum { sum: 55 };
        assert_eq!(sum.to_string(), "Main thread: initial sum = 55");
    }

    #[test]
    fn recording_sink_keeps_order() {
        let sink = RecordingSink::new();
        sink.emit(StatusLine::InitialSum { sum: 1 });
        sink.emit(StatusLine::InitialSum { sum: 2 });
        assert_eq!(
            sink.lines(),
            vec![
                StatusLine::InitialSum { sum: 1 },
                StatusLine::InitialSum { sum: 2 }
            ]
        );
    }
}
