use std::sync::atomic::Ordering;

use super::common::*;
use crate::assessments::{
    AnalysisError, Answer, Domain, PerformanceLevel, ResponseError, ResponseSet, ScoredRecord,
};
use crate::history::{AppendOutcome, StoreError};

#[tokio::test]
async fn submit_appends_one_record_per_submission() {
    let (backend, service) = memory_service();
    backend.seed(
        Domain::Routine,
        vec![ScoredRecord {
            score: 7,
            responses: routine_all('D'),
        }],
    );

    let receipt = service
        .submit(Domain::Routine, routine_all('A'))
        .await
        .expect("valid responses");

    assert_eq!(receipt.outcome.total_score, 28);
    assert_eq!(receipt.record.score, 28);
    assert!(matches!(
        receipt.persistence,
        AppendOutcome::Applied {
            total_records: 2,
            ..
        }
    ));

    let history = service.history(Domain::Routine).await;
    assert_eq!(history.records.len(), 2);
    assert_eq!(history.records[1], receipt.record);
}

#[tokio::test]
async fn invalid_responses_are_rejected_before_any_write() {
    let backend = FailingBackend::new(StoreError::Transport("offline".to_string()));
    let service = service_with(backend);

    let responses = ResponseSet::new().with("q1", Answer::choice("E. Something else."));
    let error = service
        .submit(Domain::Routine, responses)
        .await
        .expect_err("invalid responses");
    assert!(matches!(error, ResponseError::UnknownOption { .. }));
}

#[tokio::test]
async fn version_conflict_is_reported_not_swallowed() {
    let service = service_with(ConflictingBackend::default());

    let receipt = service
        .submit(Domain::Routine, routine_all('B'))
        .await
        .expect("valid responses");

    assert_eq!(receipt.outcome.total_score, 21);
    assert!(!receipt.persistence.is_applied());
    assert!(matches!(
        receipt.persistence,
        AppendOutcome::VersionConflict { .. }
    ));
    assert!(receipt
        .persistence
        .status_message()
        .starts_with("Response NOT saved"));
}

#[tokio::test]
async fn failed_read_never_reaches_the_write() {
    let backend = std::sync::Arc::new(FailingBackend::new(StoreError::Status {
        status: 500,
        body: "boom".to_string(),
    }));
    let service = crate::assessments::AssessmentService::standard(
        crate::history::HistoryStore::new(backend.clone()),
    )
    .expect("standard catalog");

    let receipt = service
        .submit(Domain::Wellbeing, routine_all('A'))
        .await;
    // Routine answers use different option labels than the well-being questionnaire.
    assert!(receipt.is_err());

    let wellbeing = service
        .questionnaire(Domain::Wellbeing)
        .questions()
        .iter()
        .fold(ResponseSet::new(), |responses, question| {
            responses.with(question.id, Answer::choice(question.kind.options()[1].value))
        });
    let receipt = service
        .submit(Domain::Wellbeing, wellbeing)
        .await
        .expect("valid responses");

    assert!(matches!(
        receipt.persistence,
        AppendOutcome::Failed(StoreError::Status { status: 500, .. })
    ));
    assert_eq!(backend.puts.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn analysis_rescoring_flags_tampered_scores() {
    let (backend, service) = memory_service();
    backend.seed(
        Domain::Awareness,
        vec![
            ScoredRecord {
                score: 34,
                responses: awareness_mixed(),
            },
            ScoredRecord {
                score: 40,
                responses: awareness_mixed(),
            },
        ],
    );

    let honest = service
        .analyze(Domain::Awareness, 0)
        .await
        .expect("analysis");
    assert!(honest.consistent);
    assert_eq!(honest.classification.level, PerformanceLevel::Moderate);
    assert_eq!(honest.insights.improvements.len(), 3);

    let tampered = service
        .analyze(Domain::Awareness, 1)
        .await
        .expect("analysis");
    assert!(!tampered.consistent);
    assert_eq!(tampered.stored_score, 40);
    assert_eq!(tampered.recomputed_score, 34);
}

#[tokio::test]
async fn analysis_reports_bad_indexes_and_stale_records() {
    let (backend, service) = memory_service();
    backend.seed(
        Domain::Routine,
        vec![ScoredRecord {
            score: 4,
            responses: ResponseSet::new().with("q8", Answer::choice("A. Quickly.")),
        }],
    );

    assert_eq!(
        service.analyze(Domain::Routine, 3).await,
        Err(AnalysisError::IndexOutOfRange {
            domain: Domain::Routine,
            index: 3,
            available: 1,
        })
    );
    assert!(matches!(
        service.analyze(Domain::Routine, 0).await,
        Err(AnalysisError::InvalidRecord { index: 0, .. })
    ));
}

#[tokio::test]
async fn summary_attaches_load_issues() {
    let service = service_with(FailingBackend::new(StoreError::MissingCredential));

    let (summary, issue) = service.summary(Domain::Activities).await;
    assert_eq!(summary.submissions, 0);
    assert_eq!(issue, Some(StoreError::MissingCredential));
}
