//! Polling Consumer - the dashboard read loop as a library component
//!
//! While an observation session is active the dashboard re-fetches logs
//! on a fixed interval and recomputes frequency statistics from whatever
//! has been ingested so far. This module packages that loop: poll a logs
//! source, aggregate the configured fields, publish the latest snapshot
//! on a watch channel.
//!
//! Failure handling follows the client contract: a fetch error or a
//! response without the expected `logs` array degrades to an empty
//! snapshot ("no data available"), never a panic. The next tick is the
//! retry - there is no retry logic beyond the interval itself, and
//! `MissedTickBehavior::Delay` guarantees fetches never overlap.

use crate::query::QueryService;
use crate::record::LogKind;
use crate::stats::{aggregate, FrequencyTable};
use crate::store::LogStore;
use crate::{Error, Result};
use indexmap::IndexMap;
use serde_json::Value;
use std::future::Future;
use std::time::Duration;
use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::warn;

/// Default poll cadence while a session is active.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Anything that can produce a `{logs: [...]}` response.
///
/// The HTTP dashboard fetches over the wire; in-process consumers adapt
/// the query service with [`QuerySource`]; tests supply stubs.
pub trait LogsSource: Send + Sync {
    /// Fetch the current logs response.
    fn fetch(&self) -> impl Future<Output = Result<Value>> + Send;
}

/// [`LogsSource`] over a local [`QueryService`], one per log kind.
pub struct QuerySource<S> {
    query: QueryService<S>,
    kind: LogKind,
}

impl<S> QuerySource<S> {
    /// Adapt a query service as a logs source for `kind`.
    #[must_use]
    pub fn new(query: QueryService<S>, kind: LogKind) -> Self {
        Self { query, kind }
    }
}

impl<S: LogStore> LogsSource for QuerySource<S> {
    async fn fetch(&self) -> Result<Value> {
        let logs = match self.kind {
            LogKind::Emotion => serde_json::to_value(self.query.emotions(None).await?)?,
            LogKind::Behavior => serde_json::to_value(self.query.behaviors(None).await?)?,
        };
        Ok(serde_json::json!({ "logs": logs }))
    }
}

/// Pull the `logs` array out of a response.
///
/// # Errors
///
/// [`Error::MalformedResponse`] when the shape is not an object with a
/// `logs` array. Callers are expected to map that to an empty record
/// set, which is exactly what the poller does.
pub fn try_extract_logs(response: &Value) -> Result<Vec<Value>> {
    response
        .get("logs")
        .and_then(Value::as_array)
        .cloned()
        .ok_or_else(|| Error::MalformedResponse("response has no `logs` array".to_string()))
}

/// Point-in-time statistics published by the poller.
#[derive(Debug, Clone, Default)]
pub struct StatsSnapshot {
    /// Frequency table per configured field
    pub fields: IndexMap<String, FrequencyTable>,
    /// Number of records the snapshot was computed from
    pub records: usize,
}

impl StatsSnapshot {
    fn compute(logs: &[Value], fields: &[String]) -> Self {
        let field_refs: Vec<&str> = fields.iter().map(String::as_str).collect();
        Self {
            fields: aggregate(logs, &field_refs),
            records: logs.len(),
        }
    }

    fn empty(fields: &[String]) -> Self {
        Self::compute(&[], fields)
    }

    /// Mode category for `field`, `None` when there is no data.
    #[must_use]
    pub fn most_frequent(&self, field: &str) -> Option<(&str, u64)> {
        self.fields.get(field).and_then(FrequencyTable::most_frequent)
    }
}

/// Fixed-interval statistics poller.
pub struct StatsPoller<F> {
    source: F,
    fields: Vec<String>,
    interval: Duration,
}

impl<F: LogsSource + 'static> StatsPoller<F> {
    /// Create a poller aggregating `fields` from `source` at the default
    /// 5-second cadence.
    #[must_use]
    pub fn new(source: F, fields: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            source,
            fields: fields.into_iter().map(Into::into).collect(),
            interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Override the poll interval.
    #[must_use]
    pub const fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Start polling. The first fetch happens immediately.
    ///
    /// Returns a handle that stops the loop and a watch receiver holding
    /// the latest snapshot. Dropping receivers does not stop the loop;
    /// stopping is explicit via [`PollerHandle::stop`].
    #[must_use]
    pub fn spawn(self) -> (PollerHandle, watch::Receiver<StatsSnapshot>) {
        let (tx, rx) = watch::channel(StatsSnapshot::empty(&self.fields));
        let (stop_tx, mut stop_rx) = oneshot::channel::<()>();

        let Self {
            source,
            fields,
            interval,
        } = self;

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = &mut stop_rx => break,
                    _ = ticker.tick() => {
                        // send_replace keeps publishing even with no
                        // receivers; stopping is the handle's job
                        tx.send_replace(poll_once(&source, &fields).await);
                    }
                }
            }
        });

        (PollerHandle { stop: stop_tx, task }, rx)
    }
}

async fn poll_once<F: LogsSource>(source: &F, fields: &[String]) -> StatsSnapshot {
    match source.fetch().await {
        Ok(response) => match try_extract_logs(&response) {
            Ok(logs) => StatsSnapshot::compute(&logs, fields),
            Err(e) => {
                warn!(error = %e, "malformed logs response, treating as empty");
                StatsSnapshot::empty(fields)
            }
        },
        Err(e) => {
            warn!(error = %e, "poll fetch failed, degrading to empty stats");
            StatsSnapshot::empty(fields)
        }
    }
}

/// Stops a running [`StatsPoller`] without leaking its timer task.
pub struct PollerHandle {
    stop: oneshot::Sender<()>,
    task: JoinHandle<()>,
}

impl PollerHandle {
    /// Signal the loop to stop and wait for the task to finish.
    pub async fn stop(self) {
        let _ = self.stop.send(());
        let _ = self.task.await;
    }
}
