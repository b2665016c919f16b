//! Shared handler state.

use crate::WorldLocks;
use folio_interface::{CompletionDriver, WorldStore};
use folio_narrative::ContinuationExecutor;
use std::sync::Arc;

/// State shared by every route.
pub struct AppState<D: CompletionDriver> {
    executor: Arc<ContinuationExecutor<D>>,
    locks: WorldLocks,
}

impl<D: CompletionDriver> AppState<D> {
    /// Wrap an executor with a fresh lock table.
    pub fn new(executor: ContinuationExecutor<D>) -> Self {
        Self {
            executor: Arc::new(executor),
            locks: WorldLocks::new(),
        }
    }

    /// The continuation executor.
    pub fn executor(&self) -> &ContinuationExecutor<D> {
        &self.executor
    }

    /// The World store behind the executor.
    pub fn store(&self) -> &Arc<dyn WorldStore> {
        self.executor.store()
    }

    /// Per-World locks.
    pub fn locks(&self) -> &WorldLocks {
        &self.locks
    }
}

impl<D: CompletionDriver> Clone for AppState<D> {
    fn clone(&self) -> Self {
        Self {
            executor: Arc::clone(&self.executor),
            locks: self.locks.clone(),
        }
    }
}
