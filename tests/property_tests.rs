//! Property-based tests for the aggregation and query contracts
//!
//! Invariants under test:
//! - counts always sum to the number of contributing records
//! - the mode is a member of the table and holds the maximum count
//! - aggregation is deterministic and idempotent
//! - a positive limit bounds the result set and preserves recency order

use emotilive_log::ingest::Ingestor;
use emotilive_log::query::QueryService;
use emotilive_log::stats::{aggregate, emotion_stats};
use emotilive_log::store::MemoryLogStore;
use proptest::prelude::*;
use serde_json::json;
use std::sync::Arc;

const EMOTIONS: &[&str] = &["Happy", "Sad", "Angry", "Neutral", "Surprise", "Fear"];

/// Generate a sequence of observation labels
fn arb_labels(max_len: usize) -> impl Strategy<Value = Vec<&'static str>> {
    proptest::collection::vec(proptest::sample::select(EMOTIONS), 0..max_len)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // ========================================================================
    // Aggregation Properties
    // ========================================================================

    /// Property: counts sum to the number of records carrying the field
    #[test]
    fn prop_counts_sum_to_record_count(labels in arb_labels(64)) {
        let records: Vec<_> = labels.iter().map(|l| json!({"emotion": l})).collect();
        let result = aggregate(&records, &["emotion"]);
        prop_assert_eq!(result["emotion"].total(), labels.len() as u64);
    }

    /// Property: the mode holds the strictly maximal count of the table
    #[test]
    fn prop_most_frequent_is_the_maximum(labels in arb_labels(64)) {
        let records: Vec<_> = labels.iter().map(|l| json!({"emotion": l})).collect();
        let result = aggregate(&records, &["emotion"]);
        let table = &result["emotion"];

        match table.most_frequent() {
            None => prop_assert!(labels.is_empty()),
            Some((label, count)) => {
                prop_assert_eq!(table.get(label), count);
                for (_, other) in table.iter() {
                    prop_assert!(other <= count);
                }
            }
        }
    }

    /// Property: same input sequence, same table - including order
    #[test]
    fn prop_aggregation_is_deterministic(labels in arb_labels(64)) {
        let records: Vec<_> = labels.iter().map(|l| json!({"emotion": l})).collect();
        let first = aggregate(&records, &["emotion"]);
        let second = aggregate(&records, &["emotion"]);

        prop_assert_eq!(&first["emotion"], &second["emotion"]);
        let order_a: Vec<&str> = first["emotion"].iter().map(|(l, _)| l).collect();
        let order_b: Vec<&str> = second["emotion"].iter().map(|(l, _)| l).collect();
        prop_assert_eq!(order_a, order_b);
    }

    /// Property: records without the field never contribute
    #[test]
    fn prop_missing_fields_are_skipped(
        labels in arb_labels(32),
        noise in 0usize..32,
    ) {
        let mut records: Vec<_> = labels.iter().map(|l| json!({"emotion": l})).collect();
        for i in 0..noise {
            records.push(json!({"student": format!("s{i}")}));
        }
        let result = aggregate(&records, &["emotion"]);
        prop_assert_eq!(result["emotion"].total(), labels.len() as u64);
    }

    // ========================================================================
    // Ingest/Query Round-Trip Properties
    // ========================================================================

    /// Property: ingest-then-aggregate reproduces exact per-label counts
    #[test]
    fn prop_roundtrip_counts_match(labels in arb_labels(24)) {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let store = Arc::new(MemoryLogStore::new());
            let ingest = Ingestor::new(Arc::clone(&store));
            let query = QueryService::new(Arc::clone(&store));

            for label in &labels {
                ingest
                    .ingest_emotion(&json!({"student": "s1", "emotion": label}))
                    .await
                    .unwrap();
            }

            let table = emotion_stats(&query.emotions(None).await.unwrap());
            for label in EMOTIONS {
                let expected = labels.iter().filter(|l| *l == label).count() as u64;
                prop_assert_eq!(table.get(label), expected);
            }
            Ok(())
        })?;
    }

    /// Property: a positive limit returns min(limit, total) records, and
    /// they are a prefix of the unlimited result
    #[test]
    fn prop_limit_bounds_and_orders(
        labels in arb_labels(24),
        limit in 1usize..32,
    ) {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let store = Arc::new(MemoryLogStore::new());
            let ingest = Ingestor::new(Arc::clone(&store));
            let query = QueryService::new(Arc::clone(&store));

            for label in &labels {
                ingest
                    .ingest_emotion(&json!({"student": "s1", "emotion": label}))
                    .await
                    .unwrap();
            }

            let all = query.emotions(None).await.unwrap();
            let limited = query.emotions(Some(limit)).await.unwrap();

            prop_assert_eq!(limited.len(), limit.min(labels.len()));
            prop_assert_eq!(&all[..limited.len()], &limited[..]);
            Ok(())
        })?;
    }
}
