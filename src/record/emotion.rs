//! Emotion Record - timestamped emotion observations per student

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Emotion Record represents a single emotion observation.
///
/// The timestamp is always assigned from the server clock at ingestion
/// time; a client-supplied timestamp is ignored for this kind. Behavior
/// records are the opposite (client-stamped) - the two kinds deliberately
/// keep their historical stamping rules.
///
/// The `emotion` label is an open vocabulary: the data layer stores the
/// exact string it was given, with no normalization or trimming.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmotionRecord {
    timestamp: DateTime<Utc>,
    student: String,
    emotion: String,
}

impl EmotionRecord {
    /// Create a new emotion record stamped with the current server time.
    ///
    /// # Arguments
    ///
    /// * `student` - student identifier
    /// * `emotion` - emotion label (e.g. "Happy", "Neutral")
    #[must_use]
    pub fn new(student: impl Into<String>, emotion: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            student: student.into(),
            emotion: emotion.into(),
        }
    }

    /// Create a record with an explicit timestamp.
    ///
    /// Only retrieval-order tests need this; the ingestion path always
    /// goes through [`EmotionRecord::new`].
    #[must_use]
    pub fn with_timestamp(
        student: impl Into<String>,
        emotion: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            timestamp,
            student: student.into(),
            emotion: emotion.into(),
        }
    }

    /// Get the server-assigned timestamp.
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Get the student identifier.
    #[must_use]
    pub fn student(&self) -> &str {
        &self.student
    }

    /// Get the emotion label.
    #[must_use]
    pub fn emotion(&self) -> &str {
        &self.emotion
    }
}
