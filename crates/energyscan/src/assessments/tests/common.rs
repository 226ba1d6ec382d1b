use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::to_bytes;
use axum::http::StatusCode;
use axum::response::Response;
use serde_json::Value;

use crate::assessments::{Answer, AssessmentService, Domain, ResponseSet, ScoredRecord};
use crate::history::{
    HistoryBackend, HistorySnapshot, HistoryStore, InMemoryHistoryBackend, StoreError,
    WriteReceipt,
};

pub(super) fn routine_all(letter: char) -> ResponseSet {
    let questionnaire = crate::assessments::AssessmentCatalog::standard();
    let routine = questionnaire.questionnaire(Domain::Routine);
    routine
        .questions()
        .iter()
        .fold(ResponseSet::new(), |responses, question| {
            let option = question
                .kind
                .options()
                .iter()
                .find(|option| option.value.starts_with(letter))
                .expect("lettered option");
            responses.with(question.id, Answer::choice(option.value))
        })
}

pub(super) fn awareness_mixed() -> ResponseSet {
    ResponseSet::new()
        .with("q1", Answer::choice("Yes"))
        .with("q2", Answer::Scale(2))
        .with("q3", Answer::choice("A. Through regular tracking or journaling."))
        .with("q4", Answer::Scale(5))
        .with(
            "q5",
            Answer::choices([
                "A. Adjust tasks to match energy levels.",
                "C. Push through regardless.",
            ]),
        )
        .with("q6", Answer::choice("No"))
        .with("q7", Answer::Scale(3))
        .with("q8", Answer::choice("Yes"))
        .with("q9", Answer::Scale(4))
}

pub(super) fn memory_service() -> (Arc<InMemoryHistoryBackend>, AssessmentService) {
    let backend = Arc::new(InMemoryHistoryBackend::default());
    let service = AssessmentService::standard(HistoryStore::new(backend.clone()))
        .expect("standard catalog");
    (backend, service)
}

pub(super) fn service_with(backend: impl HistoryBackend + 'static) -> AssessmentService {
    AssessmentService::standard(HistoryStore::new(Arc::new(backend))).expect("standard catalog")
}

/// Reads succeed, every write loses the race.
#[derive(Debug, Default)]
pub(super) struct ConflictingBackend {
    pub(super) puts: AtomicUsize,
}

#[async_trait]
impl HistoryBackend for ConflictingBackend {
    async fn fetch(&self, _domain: Domain) -> Result<HistorySnapshot, StoreError> {
        Ok(HistorySnapshot {
            records: Vec::new(),
            version: Some("sha-1".to_string()),
        })
    }

    async fn put(
        &self,
        _domain: Domain,
        _records: &[ScoredRecord],
        _expected_version: Option<&str>,
        _message: &str,
    ) -> Result<WriteReceipt, StoreError> {
        self.puts.fetch_add(1, Ordering::SeqCst);
        Err(StoreError::VersionConflict {
            message: "sha does not match".to_string(),
        })
    }

    fn describe(&self, domain: Domain) -> String {
        format!("conflicting://{}", domain.slug())
    }
}

/// Every request fails the same way, and writes are counted.
#[derive(Debug)]
pub(super) struct FailingBackend {
    pub(super) error: StoreError,
    pub(super) puts: AtomicUsize,
}

impl FailingBackend {
    pub(super) fn new(error: StoreError) -> Self {
        Self {
            error,
            puts: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl HistoryBackend for FailingBackend {
    async fn fetch(&self, _domain: Domain) -> Result<HistorySnapshot, StoreError> {
        Err(self.error.clone())
    }

    async fn put(
        &self,
        _domain: Domain,
        _records: &[ScoredRecord],
        _expected_version: Option<&str>,
        _message: &str,
    ) -> Result<WriteReceipt, StoreError> {
        self.puts.fetch_add(1, Ordering::SeqCst);
        Err(self.error.clone())
    }

    fn describe(&self, domain: Domain) -> String {
        format!("failing://{}", domain.slug())
    }
}

pub(super) async fn json_body(response: Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    let value = serde_json::from_slice(&bytes).expect("json body");
    (status, value)
}
