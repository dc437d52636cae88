//! Persistent log store backed by JSON-lines files.
//!
//! One file per collection under a data directory:
//!
//! ```text
//! <data_dir>/emotion_logs.jsonl
//! <data_dir>/behaviour_logs.jsonl
//! ```
//!
//! Each append writes one serialized record per line and flushes before
//! the record becomes visible to readers, so a crash never loses an
//! acknowledged write. On open, existing files are replayed into an inner
//! [`MemoryLogStore`] which serves all reads; lines that fail to parse are
//! skipped with a warning rather than aborting startup.

use super::{LogStore, MemoryLogStore};
use crate::record::{BehaviorRecord, EmotionRecord};
use crate::{Error, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{info, warn};

const EMOTION_FILE: &str = "emotion_logs.jsonl";
const BEHAVIOUR_FILE: &str = "behaviour_logs.jsonl";

/// JSON-lines log store.
///
/// Construction happens exactly once at startup ([`JsonlLogStore::open`])
/// and the handle is shared behind an `Arc`; there is no lazily-created
/// global connection to race on.
pub struct JsonlLogStore {
    inner: MemoryLogStore,
    dir: PathBuf,
    emotion_file: Mutex<File>,
    behavior_file: Mutex<File>,
}

impl JsonlLogStore {
    /// Open (or create) a store under `dir`, replaying any existing logs.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or files cannot be created or
    /// read. Individual corrupt lines are skipped, not fatal.
    pub async fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir)?;

        let inner = MemoryLogStore::new();

        let emotion_path = dir.join(EMOTION_FILE);
        for record in replay::<EmotionRecord>(&emotion_path)? {
            inner.append_emotion(record).await?;
        }
        let behaviour_path = dir.join(BEHAVIOUR_FILE);
        for record in replay::<BehaviorRecord>(&behaviour_path)? {
            inner.append_behavior(record).await?;
        }

        info!(
            dir = %dir.display(),
            emotions = inner.emotion_count().await?,
            behaviors = inner.behavior_count().await?,
            "opened JSONL log store"
        );

        Ok(Self {
            inner,
            emotion_file: Mutex::new(append_handle(&emotion_path)?),
            behavior_file: Mutex::new(append_handle(&behaviour_path)?),
            dir,
        })
    }

    /// Directory this store persists into.
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.dir
    }

    fn persist<T: Serialize>(file: &Mutex<File>, record: &T) -> Result<()> {
        let line = serde_json::to_string(record)?;
        let mut file = file
            .lock()
            .map_err(|e| Error::StoreUnavailable(format!("log file lock poisoned: {e}")))?;
        writeln!(file, "{line}")?;
        file.flush()?;
        Ok(())
    }
}

fn append_handle(path: &Path) -> Result<File> {
    Ok(OpenOptions::new().create(true).append(true).open(path)?)
}

/// Read back every parseable record from a JSONL file, in file order.
fn replay<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let reader = BufReader::new(File::open(path)?);
    let mut records = Vec::new();
    for (lineno, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<T>(&line) {
            Ok(record) => records.push(record),
            Err(e) => {
                warn!(
                    file = %path.display(),
                    line = lineno + 1,
                    error = %e,
                    "skipping corrupt log line"
                );
            }
        }
    }
    Ok(records)
}

impl LogStore for JsonlLogStore {
    async fn append_emotion(&self, record: EmotionRecord) -> Result<()> {
        Self::persist(&self.emotion_file, &record)?;
        self.inner.append_emotion(record).await
    }

    async fn append_behavior(&self, record: BehaviorRecord) -> Result<()> {
        Self::persist(&self.behavior_file, &record)?;
        self.inner.append_behavior(record).await
    }

    async fn emotions(&self, limit: usize) -> Result<Vec<EmotionRecord>> {
        self.inner.emotions(limit).await
    }

    async fn behaviors(&self, limit: usize) -> Result<Vec<BehaviorRecord>> {
        self.inner.behaviors(limit).await
    }

    async fn emotion_count(&self) -> Result<usize> {
        self.inner.emotion_count().await
    }

    async fn behavior_count(&self) -> Result<usize> {
        self.inner.behavior_count().await
    }
}
