//! Energy self-assessments: questionnaire definitions, response collection, scoring,
//! classification, and the service and HTTP surface built on the history store.

pub mod catalog;
pub mod domain;
pub mod export;
pub mod questionnaire;
pub mod router;
pub mod scoring;
pub mod service;
pub mod summary;

#[cfg(test)]
mod tests;

pub use catalog::AssessmentCatalog;
pub use domain::{
    Answer, ChoiceOption, Domain, OptionGrade, QuestionKind, QuestionSpec, ResponseSet,
    ScoredRecord, UnknownDomain,
};
pub use export::write_history_csv;
pub use questionnaire::{
    CompletedResponses, Questionnaire, QuestionnaireError, ResolvedAnswer, ResponseCollector,
    ResponseError,
};
pub use router::assessment_router;
pub use scoring::{
    AssessmentEngine, AssessmentOutcome, Classification, ClassificationBand,
    ClassificationScale, InsightNote, PerformanceLevel, ResponseInsights, ScoreComponent,
};
pub use service::{AnalysisError, AssessmentService, ResponseAnalysis, SubmissionReceipt};
pub use summary::{HistorySummary, LatestSubmission, LevelCount};
