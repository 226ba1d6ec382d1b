use super::common::*;
use crate::assessments::{
    Answer, AssessmentEngine, Domain, PerformanceLevel, ResponseSet, ScoreComponent,
};

#[test]
fn routine_all_a_reaches_peak_consistency() {
    let engine = AssessmentEngine::standard().expect("standard catalog");
    let (_, outcome) = engine
        .evaluate(Domain::Routine, &routine_all('A'))
        .expect("valid responses");

    assert_eq!(outcome.total_score, 28);
    assert_eq!(outcome.max_score, 28);
    assert_eq!(outcome.classification.level, PerformanceLevel::Peak);
    assert_eq!(
        outcome.classification.label,
        "Peak Consistency and Resilience"
    );
}

#[test]
fn routine_letters_map_to_descending_tiers() {
    let engine = AssessmentEngine::standard().expect("standard catalog");
    let expected = [
        ('B', 21, PerformanceLevel::Moderate),
        ('C', 14, PerformanceLevel::Low),
        ('D', 7, PerformanceLevel::VeryLow),
    ];

    for (letter, score, level) in expected {
        let (_, outcome) = engine
            .evaluate(Domain::Routine, &routine_all(letter))
            .expect("valid responses");
        assert_eq!(outcome.total_score, score, "all-{letter}");
        assert_eq!(outcome.classification.level, level, "all-{letter}");
    }
}

#[test]
fn mixed_awareness_score_is_the_sum_of_components() {
    let engine = AssessmentEngine::standard().expect("standard catalog");
    let (_, outcome) = engine
        .evaluate(Domain::Awareness, &awareness_mixed())
        .expect("valid responses");

    let component_scores: Vec<u32> = outcome
        .components
        .iter()
        .map(|component| component.score)
        .collect();
    assert_eq!(component_scores, vec![4, 2, 4, 5, 6, 2, 3, 4, 4]);
    assert_eq!(outcome.total_score, 34);
    assert_eq!(outcome.max_score, 46);
    assert_eq!(outcome.classification.label, "Moderate Performance");
    assert_eq!(
        outcome.components[4],
        ScoreComponent {
            question_id: "q5",
            score: 6,
        }
    );
}

#[test]
fn scoring_is_deterministic() {
    let engine = AssessmentEngine::standard().expect("standard catalog");
    let responses = awareness_mixed();

    let (first_completed, first) = engine
        .evaluate(Domain::Awareness, &responses)
        .expect("valid responses");
    let (_, second) = engine
        .evaluate(Domain::Awareness, &responses)
        .expect("valid responses");
    assert_eq!(first, second);
    assert_eq!(engine.score(&first_completed), first);
}

#[test]
fn activities_all_a_is_optimal_prioritization() {
    let engine = AssessmentEngine::standard().expect("standard catalog");
    let questionnaire = engine.questionnaire(Domain::Activities);
    let responses = questionnaire
        .questions()
        .iter()
        .fold(ResponseSet::new(), |responses, question| {
            responses.with(question.id, Answer::choice(question.kind.options()[0].value))
        });

    let (_, outcome) = engine
        .evaluate(Domain::Activities, &responses)
        .expect("valid responses");
    assert_eq!(outcome.total_score, 32);
    assert_eq!(outcome.classification.label, "Optimal Prioritization");
    assert_eq!(outcome.classification.level, PerformanceLevel::Peak);
}

#[test]
fn insights_split_strengths_from_improvements() {
    let engine = AssessmentEngine::standard().expect("standard catalog");
    let (completed, _) = engine
        .evaluate(Domain::Awareness, &awareness_mixed())
        .expect("valid responses");

    let insights = engine.insights(&completed);
    let strengths: Vec<&str> = insights
        .strengths
        .iter()
        .map(|note| note.question_id)
        .collect();
    let improvements: Vec<&str> = insights
        .improvements
        .iter()
        .map(|note| note.question_id)
        .collect();

    assert_eq!(strengths, vec!["q1", "q3", "q4", "q8", "q9"]);
    assert_eq!(improvements, vec!["q2", "q5", "q6"]);
    assert_eq!(
        insights.improvements[2].note,
        "Maintain a consistent sleep schedule to optimize energy usage."
    );
}
