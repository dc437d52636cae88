//! Ingestion Service - validates and appends observation records
//!
//! Payloads arrive as untyped JSON straight off the wire. Each call
//! validates the required fields for its kind, appends exactly one
//! immutable record on success, and returns the stored record (with its
//! resolved timestamp) to the caller. A validation failure writes
//! nothing - there are no partial writes to roll back.

use crate::record::{BehaviorRecord, EmotionRecord};
use crate::store::LogStore;
use crate::{Error, Result};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

/// Ingestion front for a shared log store.
///
/// Concurrent calls never conflict: each is an independent append, and no
/// ordering is guaranteed between concurrently-submitted records beyond
/// the timestamp field itself.
pub struct Ingestor<S> {
    store: Arc<S>,
}

impl<S> Clone for Ingestor<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: LogStore> Ingestor<S> {
    /// Create an ingestor over an injected store.
    #[must_use]
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Validate and store one emotion observation.
    ///
    /// Required fields: `student`, `emotion` (non-empty strings). The
    /// record is stamped with the server clock; a `timestamp` field in
    /// the payload, if present, is ignored for this kind.
    ///
    /// # Errors
    ///
    /// [`Error::Validation`] if a required field is missing or empty;
    /// store errors pass through unchanged.
    pub async fn ingest_emotion(&self, payload: &Value) -> Result<EmotionRecord> {
        let student = required_str(payload, "student")?;
        let emotion = required_str(payload, "emotion")?;

        let record = EmotionRecord::new(student, emotion);
        self.store.append_emotion(record.clone()).await?;
        debug!(student, emotion, "stored emotion record");
        Ok(record)
    }

    /// Validate and store one behavior observation.
    ///
    /// Required fields: `student`, `gaze`, `head_pose`, `timestamp`
    /// (non-empty strings). The timestamp is the producer's, parsed from
    /// the payload; an unparseable value is stored as `null` rather than
    /// rejected.
    ///
    /// # Errors
    ///
    /// [`Error::Validation`] if a required field is missing or empty;
    /// store errors pass through unchanged.
    pub async fn ingest_behavior(&self, payload: &Value) -> Result<BehaviorRecord> {
        let student = required_str(payload, "student")?;
        let gaze = required_str(payload, "gaze")?;
        let head_pose = required_str(payload, "head_pose")?;
        let raw_timestamp = required_str(payload, "timestamp")?;

        let timestamp = BehaviorRecord::parse_client_timestamp(raw_timestamp);
        if timestamp.is_none() {
            warn!(student, raw_timestamp, "unparseable client timestamp, storing null");
        }

        let record = BehaviorRecord::new(student, gaze, head_pose, timestamp);
        self.store.append_behavior(record.clone()).await?;
        debug!(student, gaze, head_pose, "stored behavior record");
        Ok(record)
    }
}

/// Extract a required non-empty string field from an untyped payload.
fn required_str<'a>(payload: &'a Value, field: &str) -> Result<&'a str> {
    match payload.get(field).and_then(Value::as_str) {
        Some(s) if !s.is_empty() => Ok(s),
        _ => Err(Error::Validation(format!(
            "missing or empty field `{field}`"
        ))),
    }
}
