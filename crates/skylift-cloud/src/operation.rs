//! Long-running operation handles
//!
//! Provider create and delete calls are asynchronous on the provider side.
//! The facade returns an [`OperationHandle`] for each of them; callers must
//! `wait()` before issuing any call that depends on the resource existing
//! (or being gone). Handles are spawned eagerly, so a batch of them runs
//! concurrently and can be awaited in any order.

use crate::error::{CloudError, Result};
use std::future::Future;
use tokio::task::JoinHandle;

/// Handle for an in-flight provider operation
pub struct OperationHandle {
    task: JoinHandle<Result<()>>,
}

impl OperationHandle {
    /// Spawn the operation onto the runtime. The work starts immediately.
    pub fn spawn<F>(fut: F) -> Self
    where
        F: Future<Output = Result<()>> + Send + 'static,
    {
        Self {
            task: tokio::spawn(fut),
        }
    }

    /// Handle for an operation that already completed synchronously.
    pub fn ready(result: Result<()>) -> Self {
        Self::spawn(async move { result })
    }

    /// Block (await) until the provider reports the operation finished.
    pub async fn wait(self) -> Result<()> {
        match self.task.await {
            Ok(result) => result,
            Err(e) => Err(CloudError::OperationFailed(e.to_string())),
        }
    }
}
