use super::super::questionnaire::CompletedResponses;
use super::ScoreComponent;

pub(crate) fn score_responses(responses: &CompletedResponses) -> (Vec<ScoreComponent>, u32) {
    let components: Vec<ScoreComponent> = responses
        .entries()
        .iter()
        .map(|entry| ScoreComponent {
            question_id: entry.question_id,
            score: entry.answer.contribution(),
        })
        .collect();

    let total_score = components.iter().map(|component| component.score).sum();
    (components, total_score)
}
