use std::sync::Arc;

use async_trait::async_trait;

use crate::bridge::TransportError;
use crate::task::{Task, TaskResult};

/// Where workers pull tasks from and push results to.
///
/// The in-process [`Bridge`](crate::bridge::Bridge) implements this; a
/// network client for a remote bridge would too.
#[async_trait]
pub trait TaskSource: Send + Sync {
    /// Next task, or `Ok(None)` when none is available right now.
    async fn fetch_task(&self) -> Result<Option<Task>, TransportError>;

    async fn submit_result(&self, result: TaskResult) -> Result<(), TransportError>;
}

#[async_trait]
impl<T: TaskSource + ?Sized> TaskSource for Arc<T> {
    async fn fetch_task(&self) -> Result<Option<Task>, TransportError> {
        (**self).fetch_task().await
    }

    async fn submit_result(&self, result: TaskResult) -> Result<(), TransportError> {
        (**self).submit_result(result).await
    }
}
