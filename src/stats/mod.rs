//! Aggregation Engine - frequency distributions over observation records
//!
//! The statistics this service serves are single-pass frequency counts:
//! for each categorical field, a mapping from the field's exact string
//! value to its occurrence count. Matching is case-sensitive with no
//! normalization or trimming.
//!
//! The engine is permissive by contract: a record missing the target
//! field (or carrying a non-string value there) is skipped silently, not
//! an error. Tests pin this policy.
//!
//! ## Usage
//!
//! ```rust
//! use emotilive_log::record::EmotionRecord;
//! use emotilive_log::stats::emotion_stats;
//!
//! let records = vec![
//!     EmotionRecord::new("s1", "happy"),
//!     EmotionRecord::new("s2", "sad"),
//!     EmotionRecord::new("s3", "happy"),
//! ];
//!
//! let table = emotion_stats(&records);
//! assert_eq!(table.get("happy"), 2);
//! assert_eq!(table.most_frequent(), Some(("happy", 2)));
//! ```

use crate::record::{BehaviorRecord, EmotionRecord};
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

/// Frequency distribution over one categorical field.
///
/// Iteration order is first-occurrence order of each category, not
/// frequency order - consumers that want a sorted view sort explicitly.
/// For the same input sequence the table is exactly reproducible.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FrequencyTable {
    counts: IndexMap<String, u64>,
}

impl FrequencyTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one occurrence of `label`.
    pub fn increment(&mut self, label: &str) {
        if let Some(count) = self.counts.get_mut(label) {
            *count += 1;
        } else {
            self.counts.insert(label.to_string(), 1);
        }
    }

    /// Occurrence count for `label` (0 if never seen).
    #[must_use]
    pub fn get(&self, label: &str) -> u64 {
        self.counts.get(label).copied().unwrap_or(0)
    }

    /// Number of distinct categories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Whether no records contributed to the table.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Total number of counted occurrences.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Iterate categories in first-occurrence order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> + '_ {
        self.counts.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// The mode category: a left-to-right fold keeping the entry with a
    /// strictly greater count, so ties keep the earliest-encountered
    /// maximum. An empty table yields `None` - the "no data" sentinel -
    /// rather than an error.
    #[must_use]
    pub fn most_frequent(&self) -> Option<(&str, u64)> {
        let mut best: Option<(&str, u64)> = None;
        for (label, count) in self.iter() {
            match best {
                Some((_, best_count)) if count <= best_count => {}
                _ => best = Some((label, count)),
            }
        }
        best
    }
}

/// Frequency tables for the two behavior fields.
///
/// A single behavior record contributes to both tables.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BehaviorStats {
    /// Counts per gaze direction label
    pub gaze: FrequencyTable,
    /// Counts per head pose label
    pub head_pose: FrequencyTable,
}

/// Aggregate untyped records over the given fields.
///
/// One linear pass per field; records where the field is absent or not a
/// string are skipped. The result maps each requested field to its
/// frequency table (an empty table if nothing matched).
#[must_use]
pub fn aggregate(records: &[Value], fields: &[&str]) -> IndexMap<String, FrequencyTable> {
    let mut result = IndexMap::new();
    for field in fields {
        let mut table = FrequencyTable::new();
        for record in records {
            if let Some(label) = record.get(*field).and_then(Value::as_str) {
                table.increment(label);
            }
        }
        result.insert((*field).to_string(), table);
    }
    result
}

/// Frequency table over the `emotion` field of typed records.
#[must_use]
pub fn emotion_stats(records: &[EmotionRecord]) -> FrequencyTable {
    let mut table = FrequencyTable::new();
    for record in records {
        table.increment(record.emotion());
    }
    table
}

/// Gaze and head-pose tables, two independent passes over the same set.
#[must_use]
pub fn behavior_stats(records: &[BehaviorRecord]) -> BehaviorStats {
    let mut gaze = FrequencyTable::new();
    for record in records {
        gaze.increment(record.gaze());
    }
    let mut head_pose = FrequencyTable::new();
    for record in records {
        head_pose.increment(record.head_pose());
    }
    BehaviorStats { gaze, head_pose }
}
