//! Observation Record Schema
//!
//! This module provides the data structures for classroom observation
//! logging. Two record kinds exist, stored in logically separate
//! collections:
//!
//! ```text
//! EmotionRecord   [timestamp, student, emotion]          (server-stamped)
//! BehaviorRecord  [timestamp, student, gaze, head_pose]  (client-stamped)
//! ```
//!
//! Records are append-only: created exactly once at ingestion, read many
//! times, never mutated or deleted.
//!
//! ## Usage
//!
//! ```rust
//! use emotilive_log::record::{BehaviorRecord, EmotionRecord};
//!
//! // Emotion records are stamped with the server clock at creation
//! let emotion = EmotionRecord::new("student-01", "Happy");
//!
//! // Behavior records carry the producer's own timestamp
//! let behavior = BehaviorRecord::new(
//!     "student-01",
//!     "left",
//!     "forward",
//!     BehaviorRecord::parse_client_timestamp("2025-03-14T10:30:00Z"),
//! );
//! assert!(behavior.timestamp().is_some());
//! ```

mod behavior;
mod emotion;

pub use behavior::BehaviorRecord;
pub use emotion::EmotionRecord;

use serde::{Deserialize, Serialize};

/// Record kind discriminator.
///
/// Selects which log collection an operation targets; the two collections
/// share no invariant beyond the meaning of the `student` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogKind {
    /// Emotion observations (`/emotion-data`)
    Emotion,
    /// Behavior observations (`/behaviour-data`)
    Behavior,
}

impl LogKind {
    /// Collection name, as used in persistence paths and log output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Emotion => "emotion",
            Self::Behavior => "behaviour",
        }
    }
}

impl std::fmt::Display for LogKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_kind_names() {
        assert_eq!(LogKind::Emotion.as_str(), "emotion");
        assert_eq!(LogKind::Behavior.as_str(), "behaviour");
        assert_eq!(LogKind::Behavior.to_string(), "behaviour");
    }

    #[test]
    fn test_log_kind_serde() {
        let json = serde_json::to_string(&LogKind::Emotion).unwrap();
        assert_eq!(json, "\"emotion\"");
        let kind: LogKind = serde_json::from_str("\"behavior\"").unwrap();
        assert_eq!(kind, LogKind::Behavior);
    }
}
