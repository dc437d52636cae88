//! Log Store Module - append-only observation collections
//!
//! Provides the persistence seam for observation records:
//! - [`MemoryLogStore`]: lock-free in-memory backend (default)
//! - [`JsonlLogStore`]: JSON-lines backend that survives restarts
//!
//! Write pattern is append-only: records are inserted exactly once and
//! never updated or deleted. Reads return most-recent-first.
//!
//! # Example
//!
//! ```rust
//! use emotilive_log::record::EmotionRecord;
//! use emotilive_log::store::{LogStore, MemoryLogStore};
//!
//! # async fn example() -> emotilive_log::Result<()> {
//! let store = MemoryLogStore::new();
//! store.append_emotion(EmotionRecord::new("student-01", "Happy")).await?;
//!
//! let logs = store.emotions(0).await?; // 0 = unbounded
//! assert_eq!(logs.len(), 1);
//! # Ok(())
//! # }
//! ```

mod jsonl;
mod memory;

pub use jsonl::JsonlLogStore;
pub use memory::MemoryLogStore;

use crate::record::{BehaviorRecord, EmotionRecord};
use crate::Result;
use std::future::Future;

/// Append-only store of observation records, one collection per kind.
///
/// The store is a shared resource: it is constructed once at startup and
/// injected into the ingestion and query services behind an `Arc`, never
/// reached through an ambient singleton. Individual appends are atomic at
/// the store level; no invariant spans the two collections.
pub trait LogStore: Send + Sync {
    /// Append one emotion record.
    fn append_emotion(&self, record: EmotionRecord) -> impl Future<Output = Result<()>> + Send;

    /// Append one behavior record.
    fn append_behavior(&self, record: BehaviorRecord)
        -> impl Future<Output = Result<()>> + Send;

    /// Emotion records ordered by timestamp descending, ties broken by
    /// insertion order (later insert first). `limit == 0` means all.
    fn emotions(&self, limit: usize) -> impl Future<Output = Result<Vec<EmotionRecord>>> + Send;

    /// Behavior records, same ordering contract as [`LogStore::emotions`].
    /// Records whose client timestamp failed to parse sort last.
    fn behaviors(&self, limit: usize)
        -> impl Future<Output = Result<Vec<BehaviorRecord>>> + Send;

    /// Number of stored emotion records.
    fn emotion_count(&self) -> impl Future<Output = Result<usize>> + Send;

    /// Number of stored behavior records.
    fn behavior_count(&self) -> impl Future<Output = Result<usize>> + Send;
}
