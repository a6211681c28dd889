//! Worker pool.
//!
//! Each worker runs a pull loop: fetch a task, compute it, submit the
//! result. When nothing is available, or the transport fails, the worker
//! waits for the delay its [`RetryPolicy`] prescribes and tries again.

mod compute;
mod retry;
mod source;


pub use compute::compute;
pub use retry::{FixedBackoff, RetryPolicy};
pub use source::TaskSource;

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::task::{Task, TaskResult};

/// A single pull-compute-submit loop.
pub struct Worker<S: ?Sized, P: ?Sized> {
    id: usize,
    source: Arc<S>,
    policy: Arc<P>,
    shutdown: watch::Receiver<bool>,
}

impl<S, P> Worker<S, P>
where
    S: TaskSource + ?Sized,
    P: RetryPolicy + ?Sized,
{
    pub fn new(
        id: usize,
        source: Arc<S>,
        policy: Arc<P>,
        shutdown: watch::Receiver<bool>,
    ) -> Self {
        Self {
            id,
            source,
            policy,
            shutdown,
        }
    }

    /// Run until shutdown is signalled.
    pub async fn run(mut self) {
        debug!(worker = self.id, "worker started");
        let mut attempt = 0u32;

        while !*self.shutdown.borrow() {
            let fetched = tokio::select! {
                _ = self.shutdown.changed() => break,
                fetched = self.source.fetch_task() => fetched,
            };

            match fetched {
                Ok(Some(task)) => {
                    attempt = 0;
                    self.process(task).await;
                    continue;
                }
                Ok(None) => {}
                Err(error) => {
                    warn!(worker = self.id, %error, "failed to fetch task");
                }
            }

            attempt = attempt.saturating_add(1);
            if !self.pause(attempt).await {
                break;
            }
        }

        debug!(worker = self.id, "worker stopped");
    }

    async fn process(&self, task: Task) {
        let task_id = task.id;
        info!(
            worker = self.id,
            %task_id,
            operation = %task.operation,
            arg1 = task.arg1,
            arg2 = task.arg2,
            duration_ms = task.duration_ms,
            "task received"
        );

        let result = match compute(&task).await {
            Ok(value) => TaskResult::ok(task_id, value),
            Err(error) => TaskResult::failed(task_id, error),
        };

        let value = result.value;
        let error = result.error.clone();
        match self.source.submit_result(result).await {
            Ok(()) => info!(worker = self.id, %task_id, value, ?error, "result submitted"),
            Err(error) => warn!(worker = self.id, %task_id, %error, "failed to submit result"),
        }
    }

    /// Sleep for the policy's delay. Returns false if shutdown arrived first.
    async fn pause(&mut self, attempt: u32) -> bool {
        let delay = self.policy.delay(attempt);
        tokio::select! {
            _ = self.shutdown.changed() => false,
            _ = tokio::time::sleep(delay) => true,
        }
    }
}

/// A fixed number of workers sharing one task source.
pub struct WorkerPool {
    shutdown: watch::Sender<bool>,
    handles: Vec<JoinHandle<()>>,
}

impl WorkerPool {
    /// Start `count` workers on the current tokio runtime.
    pub fn spawn<S, P>(count: usize, source: Arc<S>, policy: P) -> Self
    where
        S: TaskSource + ?Sized + 'static,
        P: RetryPolicy + 'static,
    {
        let (shutdown, watcher) = watch::channel(false);
        let policy = Arc::new(policy);
        let handles = (0..count)
            .map(|id| {
                let worker = Worker::new(
                    id,
                    Arc::clone(&source),
                    Arc::clone(&policy),
                    watcher.clone(),
                );
                tokio::spawn(worker.run())
            })
            .collect();

        info!(count, "worker pool started");
        Self { shutdown, handles }
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Signal every worker to stop and wait for them.
    ///
    /// A worker in the middle of a task finishes and submits it first.
    pub async fn shutdown(self) {
        // Receivers may all be gone already; nothing to signal then.
        let _ = self.shutdown.send(true);
        for handle in self.handles {
            if let Err(error) = handle.await {
                warn!(%error, "worker task panicked");
            }
        }
        info!("worker pool stopped");
    }
}
