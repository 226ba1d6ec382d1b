use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use super::codec::{decode_history, encode_history};
use super::{HistoryBackend, HistorySnapshot, StoreError, WriteReceipt};
use crate::assessments::{Domain, ScoredRecord};

#[derive(Debug, Clone)]
struct StoredFile {
    text: String,
    version: String,
}

/// Process-local backend with the same version-token semantics as the remote host.
#[derive(Debug, Default)]
pub struct InMemoryHistoryBackend {
    files: Mutex<HashMap<Domain, StoredFile>>,
    revision: AtomicU64,
}

impl InMemoryHistoryBackend {
    fn next_version(&self) -> String {
        let revision = self.revision.fetch_add(1, Ordering::Relaxed) + 1;
        format!("mem-{revision}")
    }

    fn files(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, HashMap<Domain, StoredFile>>, StoreError> {
        self.files
            .lock()
            .map_err(|_| StoreError::Transport("in-memory history lock poisoned".to_string()))
    }

    /// Replace a domain's history outright. Returns the new version token.
    pub fn seed(&self, domain: Domain, records: Vec<ScoredRecord>) -> Option<String> {
        let text = encode_history(&records).ok()?;
        self.seed_raw(domain, text)
    }

    /// Store raw file text, e.g. to simulate a corrupted file.
    pub fn seed_raw(&self, domain: Domain, text: impl Into<String>) -> Option<String> {
        let version = self.next_version();
        let mut files = self.files().ok()?;
        files.insert(
            domain,
            StoredFile {
                text: text.into(),
                version: version.clone(),
            },
        );
        Some(version)
    }

    pub fn raw(&self, domain: Domain) -> Option<String> {
        let files = self.files().ok()?;
        files.get(&domain).map(|file| file.text.clone())
    }
}

#[async_trait]
impl HistoryBackend for InMemoryHistoryBackend {
    async fn fetch(&self, domain: Domain) -> Result<HistorySnapshot, StoreError> {
        let file = self
            .files()?
            .get(&domain)
            .cloned()
            .ok_or_else(|| StoreError::NotFound {
                path: self.describe(domain),
            })?;

        Ok(HistorySnapshot {
            records: decode_history(&file.text)?,
            version: Some(file.version),
        })
    }

    async fn put(
        &self,
        domain: Domain,
        records: &[ScoredRecord],
        expected_version: Option<&str>,
        _message: &str,
    ) -> Result<WriteReceipt, StoreError> {
        let text = encode_history(records)?;
        let mut files = self.files()?;

        let current = files.get(&domain).map(|file| file.version.as_str());
        if current != expected_version {
            return Err(StoreError::VersionConflict {
                message: format!(
                    "expected version {}, found {}",
                    expected_version.unwrap_or("<none>"),
                    current.unwrap_or("<none>")
                ),
            });
        }

        let version = self.next_version();
        files.insert(
            domain,
            StoredFile {
                text,
                version: version.clone(),
            },
        );
        Ok(WriteReceipt { version })
    }

    fn describe(&self, domain: Domain) -> String {
        format!("memory://{}", domain.history_file())
    }
}
