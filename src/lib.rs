//! # EmotiLive Log: Observation Ingestion & Aggregation Service
//!
//! Backend core of the EmotiLive classroom dashboard: accepts
//! emotion/behavior observation records from external model processes,
//! persists them append-only, and serves them back - newest first, with
//! frequency statistics - to polling dashboard clients.
//!
//! ## Components
//!
//! - [`store`]: append-only log collections (in-memory or JSON-lines)
//! - [`ingest`]: payload validation and record creation
//! - [`query`]: most-recent-first reads with optional limits
//! - [`stats`]: frequency distributions and most-frequent derivation
//! - [`api`]: the REST surface (`/emotion-data`, `/behaviour-data`)
//! - [`trigger`]: external model process invocation
//! - [`poll`]: the dashboard's fixed-interval read loop
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use emotilive_log::api::{router, AppState};
//! use emotilive_log::store::MemoryLogStore;
//! use emotilive_log::trigger::ScriptTrigger;
//! use std::sync::Arc;
//!
//! # async fn example() {
//! let store = Arc::new(MemoryLogStore::new());
//! let trigger = Arc::new(ScriptTrigger::python_script("models/emotion/main.py"));
//! let app = router(AppState::new(store, trigger));
//!
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await.unwrap();
//! axum::serve(listener, app).await.unwrap();
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub mod api;
pub mod error;
pub mod ingest;
pub mod poll;
pub mod query;
pub mod record;
pub mod stats;
pub mod store;
pub mod trigger;

pub use error::{Error, Result};

use std::path::PathBuf;

/// Runtime configuration for the server binary.
///
/// Values come from the builder or from environment variables
/// (`EMOTILIVE_PORT`, `EMOTILIVE_DATA_DIR`, `EMOTILIVE_EMOTION_MODEL`);
/// unset options fall back to an in-memory store and a port of 3000.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    port: u16,
    data_dir: Option<PathBuf>,
    emotion_model: Option<String>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            data_dir: None,
            emotion_model: None,
        }
    }
}

impl ServiceConfig {
    /// Create a configuration builder.
    #[must_use]
    pub fn builder() -> ServiceConfigBuilder {
        ServiceConfigBuilder::default()
    }

    /// Read configuration from the environment.
    #[must_use]
    pub fn from_env() -> Self {
        let mut builder = Self::builder();
        if let Some(port) = std::env::var("EMOTILIVE_PORT")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            builder = builder.port(port);
        }
        if let Ok(dir) = std::env::var("EMOTILIVE_DATA_DIR") {
            builder = builder.data_dir(dir);
        }
        if let Ok(script) = std::env::var("EMOTILIVE_EMOTION_MODEL") {
            builder = builder.emotion_model(script);
        }
        builder.build()
    }

    /// Port the HTTP listener starts probing from.
    #[must_use]
    pub const fn port(&self) -> u16 {
        self.port
    }

    /// Data directory for the JSONL store; `None` selects in-memory.
    #[must_use]
    pub fn data_dir(&self) -> Option<&PathBuf> {
        self.data_dir.as_ref()
    }

    /// Path of the emotion model script for the trigger endpoint.
    #[must_use]
    pub fn emotion_model(&self) -> Option<&str> {
        self.emotion_model.as_deref()
    }
}

/// Builder for [`ServiceConfig`].
#[derive(Debug, Default)]
pub struct ServiceConfigBuilder {
    port: Option<u16>,
    data_dir: Option<PathBuf>,
    emotion_model: Option<String>,
}

impl ServiceConfigBuilder {
    /// Set the listen port.
    #[must_use]
    pub const fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Persist logs as JSON-lines under this directory.
    #[must_use]
    pub fn data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(dir.into());
        self
    }

    /// Configure the emotion model script for the trigger endpoint.
    #[must_use]
    pub fn emotion_model(mut self, script: impl Into<String>) -> Self {
        self.emotion_model = Some(script.into());
        self
    }

    /// Build the configuration.
    #[must_use]
    pub fn build(self) -> ServiceConfig {
        ServiceConfig {
            port: self.port.unwrap_or(3000),
            data_dir: self.data_dir,
            emotion_model: self.emotion_model,
        }
    }
}
