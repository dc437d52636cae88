//! Query Service - most-recent-first reads over the log store
//!
//! Pure reads: no side effects, and an empty store is an empty result,
//! never a business error. `None` and `Some(0)` both mean "no limit",
//! matching the wire convention where `limit=0` or an absent parameter
//! returns everything.

use crate::record::{BehaviorRecord, EmotionRecord};
use crate::store::LogStore;
use crate::Result;
use std::sync::Arc;
use tracing::debug;

/// Read-side front for a shared log store.
pub struct QueryService<S> {
    store: Arc<S>,
}

impl<S> Clone for QueryService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: LogStore> QueryService<S> {
    /// Create a query service over an injected store.
    #[must_use]
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Emotion records, newest first, truncated to `limit` when positive.
    ///
    /// # Errors
    ///
    /// Propagates store errors; an empty collection is `Ok(vec![])`.
    pub async fn emotions(&self, limit: Option<usize>) -> Result<Vec<EmotionRecord>> {
        let logs = self.store.emotions(limit.unwrap_or(0)).await?;
        debug!(count = logs.len(), ?limit, "queried emotion logs");
        Ok(logs)
    }

    /// Behavior records, newest first, truncated to `limit` when positive.
    ///
    /// # Errors
    ///
    /// Propagates store errors; an empty collection is `Ok(vec![])`.
    pub async fn behaviors(&self, limit: Option<usize>) -> Result<Vec<BehaviorRecord>> {
        let logs = self.store.behaviors(limit.unwrap_or(0)).await?;
        debug!(count = logs.len(), ?limit, "queried behavior logs");
        Ok(logs)
    }
}
