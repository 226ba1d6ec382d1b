use std::sync::Arc;

use serde::Serialize;

use super::domain::{Domain, ResponseSet, ScoredRecord};
use super::questionnaire::{Questionnaire, QuestionnaireError, ResponseError};
use super::scoring::{AssessmentEngine, AssessmentOutcome, Classification, ResponseInsights};
use super::summary::HistorySummary;
use crate::history::{AppendOutcome, HistoryLoad, HistoryStore, StoreError};

/// Everything a submission produced. Persistence failures live in `persistence`, they are
/// never raised as errors after scoring succeeded.
#[derive(Debug, Clone)]
pub struct SubmissionReceipt {
    pub outcome: AssessmentOutcome,
    pub record: ScoredRecord,
    pub persistence: AppendOutcome,
}

/// Stored record re-validated and re-scored against the current questionnaire.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseAnalysis {
    pub domain: Domain,
    pub index: usize,
    pub stored_score: u32,
    pub recomputed_score: u32,
    pub consistent: bool,
    pub classification: Classification,
    pub insights: ResponseInsights,
    pub responses: ResponseSet,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AnalysisError {
    #[error("{domain} history has {available} submissions; index {index} is out of range")]
    IndexOutOfRange {
        domain: Domain,
        index: usize,
        available: usize,
    },
    #[error("unable to read {domain} history: {source}")]
    Store {
        domain: Domain,
        #[source]
        source: StoreError,
    },
    #[error("submission {index} no longer matches the {domain} questionnaire: {source}")]
    InvalidRecord {
        domain: Domain,
        index: usize,
        #[source]
        source: ResponseError,
    },
}

/// Service composing the questionnaire catalog, the scorer and the history store.
#[derive(Debug, Clone)]
pub struct AssessmentService {
    engine: Arc<AssessmentEngine>,
    store: HistoryStore,
}

impl AssessmentService {
    pub fn new(engine: Arc<AssessmentEngine>, store: HistoryStore) -> Self {
        Self { engine, store }
    }

    pub fn standard(store: HistoryStore) -> Result<Self, QuestionnaireError> {
        Ok(Self::new(Arc::new(AssessmentEngine::standard()?), store))
    }

    pub fn engine(&self) -> &AssessmentEngine {
        &self.engine
    }

    pub fn store(&self) -> &HistoryStore {
        &self.store
    }

    pub fn questionnaire(&self, domain: Domain) -> &Questionnaire {
        self.engine.questionnaire(domain)
    }

    /// Score without persisting.
    pub fn evaluate(
        &self,
        domain: Domain,
        responses: &ResponseSet,
    ) -> Result<AssessmentOutcome, ResponseError> {
        self.engine
            .evaluate(domain, responses)
            .map(|(_, outcome)| outcome)
    }

    /// Validate, score and append. Only validation errors are returned as `Err`.
    pub async fn submit(
        &self,
        domain: Domain,
        responses: ResponseSet,
    ) -> Result<SubmissionReceipt, ResponseError> {
        let (completed, outcome) = self.engine.evaluate(domain, &responses)?;
        let record = ScoredRecord {
            score: outcome.total_score,
            responses: completed.into_responses(),
        };

        tracing::info!(
            %domain,
            score = outcome.total_score,
            classification = outcome.classification.label,
            "assessment scored"
        );

        let persistence = self.store.append(domain, record.clone()).await;
        Ok(SubmissionReceipt {
            outcome,
            record,
            persistence,
        })
    }

    pub async fn history(&self, domain: Domain) -> HistoryLoad {
        self.store.load(domain).await
    }

    /// Re-score a stored submission by zero-based index.
    pub async fn analyze(
        &self,
        domain: Domain,
        index: usize,
    ) -> Result<ResponseAnalysis, AnalysisError> {
        let snapshot = self
            .store
            .fetch(domain)
            .await
            .map_err(|source| AnalysisError::Store { domain, source })?;

        let available = snapshot.records.len();
        let record = snapshot
            .records
            .into_iter()
            .nth(index)
            .ok_or(AnalysisError::IndexOutOfRange {
                domain,
                index,
                available,
            })?;

        self.analyze_record(domain, index, record)
    }

    pub fn analyze_record(
        &self,
        domain: Domain,
        index: usize,
        record: ScoredRecord,
    ) -> Result<ResponseAnalysis, AnalysisError> {
        let (completed, outcome) =
            self.engine
                .evaluate(domain, &record.responses)
                .map_err(|source| AnalysisError::InvalidRecord {
                    domain,
                    index,
                    source,
                })?;

        let consistent = outcome.total_score == record.score;
        if !consistent {
            tracing::warn!(
                %domain,
                index,
                stored = record.score,
                recomputed = outcome.total_score,
                "stored score disagrees with recomputed score"
            );
        }

        Ok(ResponseAnalysis {
            domain,
            index,
            stored_score: record.score,
            recomputed_score: outcome.total_score,
            consistent,
            classification: outcome.classification,
            insights: self.engine.insights(&completed),
            responses: record.responses,
        })
    }

    /// Lenient: a history that cannot be read summarises as empty, with the issue attached.
    pub async fn summary(&self, domain: Domain) -> (HistorySummary, Option<StoreError>) {
        let load = self.store.load(domain).await;
        let summary = HistorySummary::from_records(
            domain,
            self.questionnaire(domain).classification(),
            &load.records,
        );
        (summary, load.issue)
    }
}
