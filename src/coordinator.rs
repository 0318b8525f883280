//! 协调者: 启动工作线程, 等待全部结束, 汇总结果.
use std::thread;
use std::time::Instant;

use log::{error, info};

use crate::concurrency::delay::Delay;
use crate::concurrency::locks::SharedState;
use crate::config::FixtureConfig;
use crate::error::{FixtureError, Result};
use crate::report::RunReport;
use crate::status::{StatusLine, StatusSink};
use crate::utils::calculate_sum;
use crate::worker::{TaskDescriptor, WorkerContext};

/// Descriptors for `num_threads - 1` counter workers followed by one array worker.
/// Ids start at 1.
pub fn plan_tasks(config: &FixtureConfig) -> Vec<TaskDescriptor> {
    let mut tasks: Vec<TaskDescriptor> = (1..config.num_threads)
        .map(|id| TaskDescriptor::counter(id, config.iterations))
        .collect();
    tasks.push(TaskDescriptor::array(config.num_threads));
    tasks
}

pub struct Coordinator<'a> {
    config: &'a FixtureConfig,
    delay: &'a dyn Delay,
    sink: &'a dyn StatusSink,
}

impl<'a> Coordinator<'a> {
    pub fn new(config: &'a FixtureConfig, delay: &'a dyn Delay, sink: &'a dyn StatusSink) -> Self {
        Self {
            config,
            delay,
            sink,
        }
    }

    pub fn run(&self) -> Result<RunReport> {
        self.config.validate()?;
        let start = Instant::now();

        let state = SharedState::new(self.config.array.clone());
        let tasks = plan_tasks(self.config);
        let ctx = WorkerContext {
            state: &state,
            delay: self.delay,
            sink: self.sink,
            doubled_prefix: self.config.doubled_prefix,
        };

        let initial_sum = calculate_sum(&state.array_snapshot()?);
        self.launch_and_join(&tasks, &ctx, initial_sum)?;

        let final_array = state.array_snapshot()?;
        let final_counter = state.counter()?;
        let report = RunReport {
            initial_sum,
            final_counter,
            final_sum: calculate_sum(&final_array),
            final_array,
            counter_workers: self.config.counter_workers(),
            iterations: self.config.iterations,
            max_lock_a_holders: state.probe().max_holders(),
            lock_a_acquisitions: state.probe().acquisitions(),
            elapsed: start.elapsed(),
        };
        info!(
            "run finished in {:?}: counter {} (expected {}), sum {} -> {}",
            report.elapsed,
            report.final_counter,
            report.expected_counter(),
            report.initial_sum,
            report.final_sum
        );
        Ok(report)
    }

    /// Spawns every task, reports the initial sum while they run, then waits
    /// for all of them. The first failure is returned after everything joined.
    fn launch_and_join(
        &self,
        tasks: &[TaskDescriptor],
        ctx: &WorkerContext<'_>,
        initial_sum: i64,
    ) -> Result<()> {
        thread::scope(|scope| {
            let mut handles = Vec::with_capacity(tasks.len());
            for task in tasks {
                let handle = thread::Builder::new()
                    .name(format!("worker-{}", task.id))
                    .spawn_scoped(scope, move || ctx.run(task))
                    .map_err(|source| FixtureError::Spawn {
                        id: task.id,
                        source,
                    })?;
                handles.push((task.id, handle));
            }

            self.sink.emit(StatusLine::InitialSum { sum: initial_sum });

            let mut first_error = None;
            for (id, handle) in handles {
                let outcome = handle
                    .join()
                    .unwrap_or(Err(FixtureError::WorkerPanicked { id }));
                if let Err(err) = outcome {
                    error!("worker {id} failed: {err}");
                    first_error.get_or_insert(err);
                }
            }
            first_error.map_or(Ok(()), Err)
        })
    }
}

/// Runs the fixture once with the given workload.
pub fn run(config: &FixtureConfig, delay: &dyn Delay, sink: &dyn StatusSink) -> Result<RunReport> {
    Coordinator::new(config, delay, sink).run()
}
