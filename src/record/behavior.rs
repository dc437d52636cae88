//! Behavior Record - gaze and head-pose observations per student

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Behavior Record represents a single gaze/head-pose observation.
///
/// Unlike [`EmotionRecord`](super::EmotionRecord), the timestamp comes
/// from the producer, not the server: the behavior model stamps each
/// observation at capture time and submits it with the payload.
///
/// A client timestamp that cannot be parsed is stored as `None` and
/// serialized as JSON `null`. Rejecting the record instead would drop
/// otherwise-valid gaze data, and downstream aggregation never reads the
/// timestamp.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BehaviorRecord {
    timestamp: Option<DateTime<Utc>>,
    student: String,
    gaze: String,
    head_pose: String,
}

impl BehaviorRecord {
    /// Create a new behavior record.
    ///
    /// # Arguments
    ///
    /// * `student` - student identifier
    /// * `gaze` - gaze direction label (e.g. "left", "center")
    /// * `head_pose` - head pose label (e.g. "forward", "down")
    /// * `timestamp` - parsed client timestamp, `None` if unparseable
    #[must_use]
    pub fn new(
        student: impl Into<String>,
        gaze: impl Into<String>,
        head_pose: impl Into<String>,
        timestamp: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            timestamp,
            student: student.into(),
            gaze: gaze.into(),
            head_pose: head_pose.into(),
        }
    }

    /// Parse a producer-supplied timestamp string.
    ///
    /// Accepts RFC 3339 (`2025-03-14T10:30:00Z`, offset variants) and the
    /// naive ISO-8601 form the reference producers emit
    /// (`datetime.utcnow().isoformat()`, no offset - interpreted as UTC).
    /// Anything else yields `None`.
    #[must_use]
    pub fn parse_client_timestamp(raw: &str) -> Option<DateTime<Utc>> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
            return Some(naive.and_utc());
        }
        // "YYYY-MM-DD HH:MM:SS" with a space, as str(datetime) prints
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f") {
            return Some(naive.and_utc());
        }
        None
    }

    /// Get the client-supplied timestamp, if it parsed.
    #[must_use]
    pub const fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.timestamp
    }

    /// Get the student identifier.
    #[must_use]
    pub fn student(&self) -> &str {
        &self.student
    }

    /// Get the gaze label.
    #[must_use]
    pub fn gaze(&self) -> &str {
        &self.gaze
    }

    /// Get the head pose label.
    #[must_use]
    pub fn head_pose(&self) -> &str {
        &self.head_pose
    }
}
