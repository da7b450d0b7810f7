//! Per-call worker pool
//!
//! A [`WorkerPool`] runs one job per logical worker on a dedicated rayon
//! thread pool and blocks until every job has finished. Logical workers
//! are multiplexed onto at most [`available_workers`] OS threads.
//!
//! A job that returns an error or panics fails the whole run; no partial
//! result is ever returned.

use crate::error::{Error, Result};
use rayon::prelude::*;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

/// Number of hardware threads available to this process (at least 1).
pub fn available_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// Fixed-size pool that runs one job per logical worker.
pub struct WorkerPool {
    pool: rayon::ThreadPool,
    workers: usize,
}

impl WorkerPool {
    /// Build a pool for `workers` logical workers.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidWorkerCount`] if `workers` is 0, or
    /// [`Error::ThreadPool`] if the threads cannot be spawned.
    pub fn new(workers: usize) -> Result<Self> {
        if workers == 0 {
            return Err(Error::InvalidWorkerCount(workers));
        }
        let threads = workers.min(available_workers());
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("histeq-worker-{i}"))
            .build()
            .map_err(|e| Error::ThreadPool(e.to_string()))?;
        log::trace!("worker pool: {} workers on {} threads", workers, threads);
        Ok(Self { pool, workers })
    }

    /// Get the number of logical workers.
    #[inline]
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Get the number of OS threads backing the pool.
    pub fn threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Run `job` once for every element of `inputs` and wait for all of them.
    ///
    /// `job` receives the worker index and that worker's input. Results are
    /// returned in worker order.
    ///
    /// # Errors
    ///
    /// Returns the error of the lowest-numbered failing worker. A panicking
    /// job is reported as [`Error::WorkerFailed`].
    pub fn run<I, T, F>(&self, inputs: Vec<I>, job: F) -> Result<Vec<T>>
    where
        I: Send,
        T: Send,
        F: Fn(usize, I) -> Result<T> + Sync,
    {
        let outcomes: Vec<Result<T>> = self.pool.install(|| {
            inputs
                .into_par_iter()
                .enumerate()
                .map(|(worker, input)| {
                    panic::catch_unwind(AssertUnwindSafe(|| job(worker, input))).unwrap_or_else(
                        |payload| {
                            Err(Error::WorkerFailed {
                                worker,
                                reason: panic_reason(payload.as_ref()),
                            })
                        },
                    )
                })
                .collect()
        });

        outcomes.into_iter().collect()
    }
}

fn panic_reason(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("panicked: {s}")
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("panicked: {s}")
    } else {
        "panicked".to_string()
    }
}
