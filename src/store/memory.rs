//! In-memory log store implementation using `DashMap`.
//!
//! This is the default backend - data is lost on process restart.
//! For persistence, use [`JsonlLogStore`](super::JsonlLogStore).

use super::LogStore;
use crate::record::{BehaviorRecord, EmotionRecord};
use crate::Result;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// In-memory observation store using lock-free concurrent maps.
///
/// Thread-safe: concurrent appends never conflict, each is an independent
/// insert under a fresh sequence number. The sequence number doubles as
/// the retrieval tie-breaker, so ordering is stable across repeated
/// reads with no writes in between.
///
/// # Example
///
/// ```rust
/// use emotilive_log::record::EmotionRecord;
/// use emotilive_log::store::{LogStore, MemoryLogStore};
///
/// # async fn example() -> emotilive_log::Result<()> {
/// let store = MemoryLogStore::new();
/// store.append_emotion(EmotionRecord::new("s1", "Happy")).await?;
/// assert_eq!(store.emotion_count().await?, 1);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct MemoryLogStore {
    emotions: DashMap<u64, EmotionRecord>,
    behaviors: DashMap<u64, BehaviorRecord>,
    seq: AtomicU64,
}

impl MemoryLogStore {
    /// Create a new empty in-memory log store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with pre-allocated capacity per collection.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            emotions: DashMap::with_capacity(capacity),
            behaviors: DashMap::with_capacity(capacity),
            seq: AtomicU64::new(0),
        }
    }

    /// Check if both collections are empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.emotions.is_empty() && self.behaviors.is_empty()
    }

    fn next_seq(&self) -> u64 {
        self.seq.fetch_add(1, Ordering::Relaxed)
    }

    fn sorted_emotions(&self, limit: usize) -> Vec<EmotionRecord> {
        let mut entries: Vec<(u64, EmotionRecord)> = self
            .emotions
            .iter()
            .map(|e| (*e.key(), e.value().clone()))
            .collect();
        // timestamp descending, later insert first on ties
        entries.sort_by(|a, b| {
            b.1.timestamp()
                .cmp(&a.1.timestamp())
                .then_with(|| b.0.cmp(&a.0))
        });
        if limit > 0 {
            entries.truncate(limit);
        }
        entries.into_iter().map(|(_, r)| r).collect()
    }

    fn sorted_behaviors(&self, limit: usize) -> Vec<BehaviorRecord> {
        let mut entries: Vec<(u64, BehaviorRecord)> = self
            .behaviors
            .iter()
            .map(|e| (*e.key(), e.value().clone()))
            .collect();
        // Option ordering puts None before Some, so descending comparison
        // naturally sorts unparseable timestamps last
        entries.sort_by(|a, b| {
            b.1.timestamp()
                .cmp(&a.1.timestamp())
                .then_with(|| b.0.cmp(&a.0))
        });
        if limit > 0 {
            entries.truncate(limit);
        }
        entries.into_iter().map(|(_, r)| r).collect()
    }
}

impl LogStore for MemoryLogStore {
    async fn append_emotion(&self, record: EmotionRecord) -> Result<()> {
        self.emotions.insert(self.next_seq(), record);
        Ok(())
    }

    async fn append_behavior(&self, record: BehaviorRecord) -> Result<()> {
        self.behaviors.insert(self.next_seq(), record);
        Ok(())
    }

    async fn emotions(&self, limit: usize) -> Result<Vec<EmotionRecord>> {
        Ok(self.sorted_emotions(limit))
    }

    async fn behaviors(&self, limit: usize) -> Result<Vec<BehaviorRecord>> {
        Ok(self.sorted_behaviors(limit))
    }

    async fn emotion_count(&self) -> Result<usize> {
        Ok(self.emotions.len())
    }

    async fn behavior_count(&self) -> Result<usize> {
        Ok(self.behaviors.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    #[tokio::test]
    async fn test_memory_store_append_and_count() {
        let store = MemoryLogStore::new();
        assert!(store.is_empty());

        store
            .append_emotion(EmotionRecord::new("s1", "Happy"))
            .await
            .unwrap();
        store
            .append_behavior(BehaviorRecord::new("s1", "left", "forward", None))
            .await
            .unwrap();

        assert_eq!(store.emotion_count().await.unwrap(), 1);
        assert_eq!(store.behavior_count().await.unwrap(), 1);
        assert!(!store.is_empty());
    }

    #[tokio::test]
    async fn test_emotions_most_recent_first() {
        let store = MemoryLogStore::new();
        let base = Utc::now();

        for (i, label) in ["old", "mid", "new"].iter().enumerate() {
            let ts = base + Duration::seconds(i as i64);
            store
                .append_emotion(EmotionRecord::with_timestamp("s1", *label, ts))
                .await
                .unwrap();
        }

        let logs = store.emotions(0).await.unwrap();
        let labels: Vec<&str> = logs.iter().map(EmotionRecord::emotion).collect();
        assert_eq!(labels, vec!["new", "mid", "old"]);
    }

    #[tokio::test]
    async fn test_timestamp_ties_broken_by_insertion_order() {
        let store = MemoryLogStore::new();
        let ts = Utc::now();

        store
            .append_emotion(EmotionRecord::with_timestamp("s1", "first", ts))
            .await
            .unwrap();
        store
            .append_emotion(EmotionRecord::with_timestamp("s1", "second", ts))
            .await
            .unwrap();

        // Later insert wins the tie, and repeated reads agree
        let logs = store.emotions(0).await.unwrap();
        assert_eq!(logs[0].emotion(), "second");
        assert_eq!(store.emotions(0).await.unwrap(), logs);
    }

    #[tokio::test]
    async fn test_limit_semantics() {
        let store = MemoryLogStore::new();
        let base = Utc::now();
        for i in 0..5 {
            let ts = base + Duration::seconds(i);
            store
                .append_emotion(EmotionRecord::with_timestamp("s1", format!("e{i}"), ts))
                .await
                .unwrap();
        }

        assert_eq!(store.emotions(0).await.unwrap().len(), 5);
        assert_eq!(store.emotions(2).await.unwrap().len(), 2);
        // limit larger than the collection returns everything
        assert_eq!(store.emotions(50).await.unwrap().len(), 5);

        // limit = N returns the N most recent
        let top2 = store.emotions(2).await.unwrap();
        assert_eq!(top2[0].emotion(), "e4");
        assert_eq!(top2[1].emotion(), "e3");
    }

    #[tokio::test]
    async fn test_unparseable_behavior_timestamps_sort_last() {
        let store = MemoryLogStore::new();
        store
            .append_behavior(BehaviorRecord::new("s1", "left", "down", None))
            .await
            .unwrap();
        store
            .append_behavior(BehaviorRecord::new("s1", "right", "up", Some(Utc::now())))
            .await
            .unwrap();

        let logs = store.behaviors(0).await.unwrap();
        assert_eq!(logs[0].gaze(), "right");
        assert_eq!(logs[1].gaze(), "left");
    }

    #[tokio::test]
    async fn test_concurrent_appends() {
        use std::sync::Arc;

        let store = Arc::new(MemoryLogStore::new());
        let mut handles = vec![];

        for i in 0..100 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store
                    .append_emotion(EmotionRecord::new(format!("s{i}"), "Neutral"))
                    .await
                    .unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(store.emotion_count().await.unwrap(), 100);
    }

    #[tokio::test]
    async fn test_empty_read_is_empty_not_error() {
        let store = MemoryLogStore::with_capacity(16);
        assert!(store.emotions(0).await.unwrap().is_empty());
        assert!(store.behaviors(7).await.unwrap().is_empty());
    }
}
