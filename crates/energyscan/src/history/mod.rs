//! Append-only submission history, one JSON file per domain on a remote content host.
//!
//! `HistoryStore` owns the read-modify-write cycle; backends only move whole files and
//! report the version token that guards the next write.

pub mod codec;
pub mod github;
pub mod memory;

use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;

use crate::assessments::{Domain, ScoredRecord};

pub use github::GitHubContentsBackend;
pub use memory::InMemoryHistoryBackend;

/// Decoded history file plus the version token needed to replace it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistorySnapshot {
    pub records: Vec<ScoredRecord>,
    /// `None` when the file does not exist yet.
    pub version: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteReceipt {
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("no access token configured for the history store")]
    MissingCredential,
    #[error("history store rejected the credentials ({status}): {body}")]
    Unauthorized { status: u16, body: String },
    #[error("history file '{path}' does not exist")]
    NotFound { path: String },
    #[error("history was changed by another writer: {message}")]
    VersionConflict { message: String },
    #[error("history store returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("history store request failed: {0}")]
    Transport(String),
    #[error("stored history is malformed: {0}")]
    MalformedHistory(String),
    #[error("history could not be encoded: {0}")]
    Encoding(String),
}

/// Moves whole history files to and from a content host.
#[async_trait]
pub trait HistoryBackend: Send + Sync + Debug {
    /// Returns `StoreError::NotFound` when the domain has no history file yet.
    async fn fetch(&self, domain: Domain) -> Result<HistorySnapshot, StoreError>;

    /// Replace the domain's file. `expected_version` is the token from the fetch this
    /// write is based on, `None` for the first write.
    async fn put(
        &self,
        domain: Domain,
        records: &[ScoredRecord],
        expected_version: Option<&str>,
        message: &str,
    ) -> Result<WriteReceipt, StoreError>;

    /// Human-readable location, used in logs.
    fn describe(&self, domain: Domain) -> String;
}

/// History as read for display: never fails, carries the problem alongside an empty list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryLoad {
    pub records: Vec<ScoredRecord>,
    pub version: Option<String>,
    pub issue: Option<StoreError>,
}

/// Result of appending one record. Only `Applied` means the record is stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppendOutcome {
    Applied {
        version: String,
        total_records: usize,
    },
    /// Another writer replaced the file between our read and write; nothing was written.
    VersionConflict { message: String },
    Failed(StoreError),
}

impl AppendOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }

    pub fn status_message(&self) -> String {
        match self {
            Self::Applied { total_records, .. } => {
                format!("Response saved ({total_records} submissions on record).")
            }
            Self::VersionConflict { message } => format!(
                "Response NOT saved: history was updated concurrently ({message}). Submit again."
            ),
            Self::Failed(error) => format!("Response NOT saved: {error}"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct HistoryStore {
    backend: Arc<dyn HistoryBackend>,
}

impl HistoryStore {
    pub fn new(backend: Arc<dyn HistoryBackend>) -> Self {
        Self { backend }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryHistoryBackend::default()))
    }

    /// Strict read; a missing file is an empty history.
    pub async fn fetch(&self, domain: Domain) -> Result<HistorySnapshot, StoreError> {
        match self.backend.fetch(domain).await {
            Ok(snapshot) => Ok(snapshot),
            Err(StoreError::NotFound { path }) => {
                tracing::info!(%domain, path = %path, "no history file yet; starting empty");
                Ok(HistorySnapshot::default())
            }
            Err(error) => Err(error),
        }
    }

    /// Lenient read for display. Failures are logged and attached to the result.
    pub async fn load(&self, domain: Domain) -> HistoryLoad {
        match self.fetch(domain).await {
            Ok(snapshot) => HistoryLoad {
                records: snapshot.records,
                version: snapshot.version,
                issue: None,
            },
            Err(error) => {
                tracing::warn!(
                    %domain,
                    location = %self.backend.describe(domain),
                    error = %error,
                    "failed to load history"
                );
                HistoryLoad {
                    records: Vec::new(),
                    version: None,
                    issue: Some(error),
                }
            }
        }
    }

    /// Read, push, write back with the version token from the read. A failed read never
    /// turns into a write.
    pub async fn append(&self, domain: Domain, record: ScoredRecord) -> AppendOutcome {
        let snapshot = match self.fetch(domain).await {
            Ok(snapshot) => snapshot,
            Err(error) => {
                tracing::warn!(
                    %domain,
                    error = %error,
                    "refusing to append without current history"
                );
                return AppendOutcome::Failed(error);
            }
        };

        let mut records = snapshot.records;
        records.push(record);
        let message = format!(
            "Add {} submission at {}",
            domain.slug(),
            chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ")
        );

        match self
            .backend
            .put(domain, &records, snapshot.version.as_deref(), &message)
            .await
        {
            Ok(receipt) => {
                tracing::info!(
                    %domain,
                    version = %receipt.version,
                    total_records = records.len(),
                    "history updated"
                );
                AppendOutcome::Applied {
                    version: receipt.version,
                    total_records: records.len(),
                }
            }
            Err(StoreError::VersionConflict { message }) => {
                tracing::warn!(%domain, conflict = %message, "history write lost a race");
                AppendOutcome::VersionConflict { message }
            }
            Err(error) => {
                tracing::error!(%domain, error = %error, "history write failed");
                AppendOutcome::Failed(error)
            }
        }
    }
}
