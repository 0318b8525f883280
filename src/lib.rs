//! A small multi-threaded program for debuggers to attach to: counter workers
//! contend on one mutex while an array worker nests a second one inside it.

pub mod concurrency;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod options;
pub mod report;
pub mod status;
pub mod utils;
pub mod worker;

pub use concurrency::delay::{Delay, DelayPoint, NoDelay, SleepDelay};
pub use concurrency::locks::SharedState;
pub use config::FixtureConfig;
pub use coordinator::{Coordinator, run};
pub use error::{FixtureError, LockName};
pub use report::RunReport;
pub use status::{RecordingSink, StatusLine, StatusSink, StdoutSink};
