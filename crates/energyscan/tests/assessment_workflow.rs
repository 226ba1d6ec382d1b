use std::sync::Arc;

use energyscan::assessments::{
    Answer, AssessmentService, Domain, PerformanceLevel, QuestionKind, ResponseSet,
    ScoredRecord,
};
use energyscan::history::{AppendOutcome, HistoryStore, InMemoryHistoryBackend};

fn collect_top_answers(service: &AssessmentService, domain: Domain) -> ResponseSet {
    let questionnaire = service.questionnaire(domain);
    let mut collector = questionnaire.collector();
    for question in questionnaire.questions() {
        let answer = match &question.kind {
            QuestionKind::SingleChoice { options } => Answer::choice(options[0].value),
            QuestionKind::MultiChoice { options } => {
                Answer::choices(options.iter().map(|option| option.value))
            }
            QuestionKind::Scale { max, .. } => Answer::Scale(i64::from(*max)),
        };
        collector
            .record(question.id, answer)
            .expect("top answer is valid");
    }
    collector.finish().expect("complete").into_responses()
}

#[tokio::test]
async fn routine_submission_round_trips_through_history() {
    let backend = Arc::new(InMemoryHistoryBackend::default());
    let existing = ScoredRecord {
        score: 12,
        responses: ResponseSet::new(),
    };
    backend.seed(Domain::Routine, vec![existing.clone()]);
    let service = AssessmentService::standard(HistoryStore::new(backend)).expect("standard catalog");

    let responses = collect_top_answers(&service, Domain::Routine);
    let receipt = service
        .submit(Domain::Routine, responses.clone())
        .await
        .expect("valid responses");

    assert_eq!(receipt.outcome.total_score, 28);
    assert_eq!(
        receipt.outcome.classification.label,
        "Peak Consistency and Resilience"
    );
    assert!(matches!(
        receipt.persistence,
        AppendOutcome::Applied {
            total_records: 2,
            ..
        }
    ));

    let history = service.history(Domain::Routine).await;
    assert_eq!(
        history.records,
        vec![
            existing,
            ScoredRecord {
                score: 28,
                responses,
            },
        ]
    );
}

#[tokio::test]
async fn every_domain_scores_its_maximum_with_top_answers() {
    let service = AssessmentService::standard(HistoryStore::in_memory()).expect("standard catalog");

    for domain in Domain::ordered() {
        let responses = collect_top_answers(&service, domain);
        let outcome = service.evaluate(domain, &responses).expect("valid");
        assert_eq!(outcome.total_score, outcome.max_score, "{domain}");
        assert_eq!(outcome.classification.level, PerformanceLevel::Peak, "{domain}");
    }
}

#[tokio::test]
async fn summary_and_analysis_follow_submissions() {
    let service = AssessmentService::standard(HistoryStore::in_memory()).expect("standard catalog");
    let responses = collect_top_answers(&service, Domain::Wellbeing);

    for _ in 0..2 {
        let receipt = service
            .submit(Domain::Wellbeing, responses.clone())
            .await
            .expect("valid");
        assert!(receipt.persistence.is_applied());
    }

    let (summary, issue) = service.summary(Domain::Wellbeing).await;
    assert!(issue.is_none());
    assert_eq!(summary.submissions, 2);
    assert_eq!(summary.mean_score, Some(28.0));

    let analysis = service
        .analyze(Domain::Wellbeing, 1)
        .await
        .expect("analysis");
    assert!(analysis.consistent);
    assert_eq!(analysis.insights.strengths.len(), 7);
    assert!(analysis.insights.improvements.is_empty());
}
