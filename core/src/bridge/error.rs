use thiserror::Error;

use crate::task::TaskId;

/// Failures of the transport between schedulers and workers.
///
/// "No task available" is not an error; see [`Bridge::fetch_task`](super::Bridge::fetch_task).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The bridge has been closed and the queue is drained.
    #[error("task queue closed")]
    Closed,

    /// No session is waiting for this task (never issued, or already answered).
    #[error("no pending task with id {0}")]
    UnknownTask(TaskId),

    /// The session that issued this task has gone away.
    #[error("session for task {0} is gone")]
    SessionClosed(TaskId),
}
