//! Task distribution bridge.
//!
//! Schedulers push tasks into a bounded FIFO queue; workers pull them with
//! [`Bridge::fetch_task`] and hand results back with
//! [`Bridge::submit_result`]. Each result is routed by task id to the
//! session that issued the task, so any number of schedulers can share one
//! bridge.

mod error;


pub use error::TransportError;

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use tokio::sync::{Mutex, mpsc, watch};
use tracing::{debug, trace};

use crate::api::BridgeConfig;
use crate::task::{Task, TaskId, TaskResult};
use crate::worker::TaskSource;

/// The scheduler's end of the bridge.
///
/// Pass `tasks` and `results` to a [`Scheduler`](crate::scheduler::Scheduler).
/// Dropping `tasks` ends the session.
#[derive(Debug)]
pub struct Session {
    pub tasks: mpsc::Sender<Task>,
    pub results: mpsc::Receiver<TaskResult>,
}

#[derive(Debug)]
pub struct Bridge {
    config: BridgeConfig,
    queue_tx: mpsc::Sender<Task>,
    queue_rx: Mutex<mpsc::Receiver<Task>>,
    routes: DashMap<TaskId, mpsc::Sender<TaskResult>>,
    closed: watch::Sender<bool>,
}

impl Bridge {
    pub fn new(config: BridgeConfig) -> Arc<Self> {
        let (queue_tx, queue_rx) = mpsc::channel(config.capacity.max(1));
        Arc::new(Self {
            config,
            queue_tx,
            queue_rx: Mutex::new(queue_rx),
            routes: DashMap::new(),
            closed: watch::Sender::new(false),
        })
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Open a channel pair for one scheduler.
    ///
    /// Tasks sent on the session are registered for routing and then
    /// enqueued; the send completes only once the queue has room. Must be
    /// called from within a tokio runtime.
    pub fn open_session(self: &Arc<Self>) -> Session {
        let (task_tx, mut task_rx) = mpsc::channel::<Task>(1);
        let (result_tx, result_rx) = mpsc::channel(1);

        let bridge = Arc::clone(self);
        tokio::spawn(async move {
            while let Some(task) = task_rx.recv().await {
                let task_id = task.id;
                if bridge.is_closed() {
                    debug!(%task_id, "bridge closed, ending session");
                    break;
                }
                // Register first so a fast worker always finds the route.
                bridge.routes.insert(task_id, result_tx.clone());
                if bridge.queue_tx.send(task).await.is_err() {
                    bridge.routes.remove(&task_id);
                    debug!(%task_id, "queue closed, ending session");
                    break;
                }
                trace!(%task_id, pending = bridge.pending(), "task enqueued");
            }
        });

        Session {
            tasks: task_tx,
            results: result_rx,
        }
    }

    /// Take the oldest queued task.
    ///
    /// Returns `Ok(None)` when nothing is queued (after waiting up to
    /// `fetch_timeout`, if configured). This is distinct from
    /// [`TransportError::Closed`], which means no task will ever arrive.
    /// A pending long poll returns as soon as the bridge is closed.
    pub async fn fetch_task(&self) -> Result<Option<Task>, TransportError> {
        let next = tokio::select! {
            biased;
            next = self.next_task() => next,
            () = self.wait_closed() => {
                // Fetchers parked on the queue lock wake up too, so this
                // lock is released promptly.
                let mut queue = self.queue_rx.lock().await;
                queue.close();
                queue.try_recv().ok()
            }
        };

        match next {
            Some(task) => {
                trace!(task_id = %task.id, "task fetched");
                Ok(Some(task))
            }
            None if self.is_closed() => Err(TransportError::Closed),
            None => Ok(None),
        }
    }

    async fn next_task(&self) -> Option<Task> {
        let mut queue = self.queue_rx.lock().await;
        if self.is_closed() {
            queue.close();
        }
        match self.config.fetch_timeout {
            None => queue.try_recv().ok(),
            Some(timeout) => tokio::time::timeout(timeout, queue.recv())
                .await
                .ok()
                .flatten(),
        }
    }

    async fn wait_closed(&self) {
        let mut closed = self.closed.subscribe();
        // The sender lives in `self`, so this only errs if the bridge is gone.
        let _ = closed.wait_for(|closed| *closed).await;
    }

    /// Deliver a result to the session that issued the task.
    ///
    /// Each task id is routed at most once; a second submission fails with
    /// [`TransportError::UnknownTask`].
    pub async fn submit_result(&self, result: TaskResult) -> Result<(), TransportError> {
        let task_id = result.task_id;
        let (_, route) = self
            .routes
            .remove(&task_id)
            .ok_or(TransportError::UnknownTask(task_id))?;
        route
            .send(result)
            .await
            .map_err(|_| TransportError::SessionClosed(task_id))
    }

    /// Stop accepting tasks. Queued tasks can still be fetched.
    ///
    /// Never waits on a fetch in progress; long polls are woken instead.
    pub fn close(&self) {
        self.closed.send_replace(true);
        if let Ok(mut queue) = self.queue_rx.try_lock() {
            queue.close();
        }
    }

    pub fn is_closed(&self) -> bool {
        *self.closed.borrow()
    }

    /// Number of tasks waiting in the queue.
    pub fn pending(&self) -> usize {
        self.queue_tx.max_capacity() - self.queue_tx.capacity()
    }

    /// Number of tasks issued but not yet answered.
    pub fn in_flight(&self) -> usize {
        self.routes.len()
    }
}

#[async_trait]
impl TaskSource for Bridge {
    async fn fetch_task(&self) -> Result<Option<Task>, TransportError> {
        Bridge::fetch_task(self).await
    }

    async fn submit_result(&self, result: TaskResult) -> Result<(), TransportError> {
        Bridge::submit_result(self, result).await
    }
}
