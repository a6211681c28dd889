//! The quotient coordinator.

use std::sync::Arc;

use tracing::{info, warn};

use super::{EngineOptions, Error};
use crate::bridge::Bridge;
use crate::lifecycle::{
    ExpressionId, ExpressionRecord, ExpressionStore, MemoryStore, Outcome,
};
use crate::parser::{self, Ast};
use crate::scheduler;
use crate::worker::{FixedBackoff, WorkerPool};

/// Accepts expressions, tracks their lifecycle and schedules their tasks
/// onto a shared [`Bridge`].
///
/// The coordinator does not compute anything itself; start a
/// [`WorkerPool`] on [`Coordinator::bridge`] (or call
/// [`Coordinator::spawn_workers`]) to make progress.
///
/// # Example
///
/// ```ignore
/// use quotient_core::api::{Coordinator, EngineOptions};
///
/// let coordinator = Coordinator::new(EngineOptions::from_env());
/// let workers = coordinator.spawn_workers();
///
/// let value = coordinator.evaluate("2 + 2 * 2").await?;
/// assert_eq!(value, 6.0);
///
/// workers.shutdown().await;
/// ```
pub struct Coordinator {
    options: EngineOptions,
    bridge: Arc<Bridge>,
    store: Arc<dyn ExpressionStore>,
}

impl Coordinator {
    pub fn new(options: EngineOptions) -> Self {
        Self::with_store(options, Arc::new(MemoryStore::new()))
    }

    pub fn with_store(options: EngineOptions, store: Arc<dyn ExpressionStore>) -> Self {
        Self {
            bridge: Bridge::new(options.bridge),
            options,
            store,
        }
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// The bridge workers pull tasks from.
    pub fn bridge(&self) -> &Arc<Bridge> {
        &self.bridge
    }

    /// Start the configured number of workers on this coordinator's bridge.
    pub fn spawn_workers(&self) -> WorkerPool {
        WorkerPool::spawn(
            self.options.workers.count,
            Arc::clone(&self.bridge),
            FixedBackoff::new(self.options.workers.backoff),
        )
    }

    /// Tokenize and parse without evaluating or recording anything.
    pub fn compile(&self, source: &str) -> Result<Ast, Error> {
        Ok(parser::parse(source)?)
    }

    /// Accept an expression and evaluate it in the background.
    ///
    /// Compile errors are reported here and the record is marked `error`.
    /// Otherwise the id is returned at once; poll [`Coordinator::expression`]
    /// for the outcome. Must be called from within a tokio runtime.
    pub fn submit(&self, source: &str) -> Result<ExpressionId, Error> {
        let (id, ast) = self.accept(source)?;

        let bridge = Arc::clone(&self.bridge);
        let store = Arc::clone(&self.store);
        let options = self.options;
        tokio::spawn(async move {
            // Failures are already recorded and logged.
            let _ = run(id, ast, &bridge, store.as_ref(), &options).await;
        });

        Ok(id)
    }

    /// Accept an expression and wait for its value.
    pub async fn evaluate(&self, source: &str) -> Result<f64, Error> {
        let (id, ast) = self.accept(source)?;
        run(id, ast, &self.bridge, self.store.as_ref(), &self.options).await
    }

    pub fn expression(&self, id: ExpressionId) -> Option<ExpressionRecord> {
        self.store.get(id)
    }

    /// Every expression seen so far, oldest first.
    pub fn expressions(&self) -> Vec<ExpressionRecord> {
        self.store.list()
    }

    fn accept(&self, source: &str) -> Result<(ExpressionId, Ast), Error> {
        let id = ExpressionId::new();
        self.store
            .create(ExpressionRecord::processing(id, source))?;
        info!(%id, expression = source, "expression accepted");

        match parser::parse(source) {
            Ok(ast) => Ok((id, ast)),
            Err(err) => {
                self.store.finish(id, Outcome::Failed)?;
                warn!(%id, error = %err, "expression rejected");
                Err(err.into())
            }
        }
    }
}

async fn run(
    id: ExpressionId,
    ast: Ast,
    bridge: &Arc<Bridge>,
    store: &dyn ExpressionStore,
    options: &EngineOptions,
) -> Result<f64, Error> {
    let mut session = bridge.open_session();
    let outcome = scheduler::evaluate_with_options(
        options.execution,
        &ast,
        &options.costs,
        &session.tasks,
        &mut session.results,
    )
    .await;

    match outcome {
        Ok(value) => {
            store.finish(id, Outcome::Done(value))?;
            info!(%id, value, "expression done");
            Ok(value)
        }
        Err(err) => {
            store.finish(id, Outcome::Failed)?;
            warn!(%id, error = %err, "expression failed");
            Err(err.into())
        }
    }
}
