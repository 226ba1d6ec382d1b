use serde::Serialize;

use super::super::domain::OptionGrade;
use super::super::questionnaire::{CompletedResponses, Questionnaire, ResolvedAnswer};

/// Per-question notes drawn from a completed response set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResponseInsights {
    pub strengths: Vec<InsightNote>,
    pub improvements: Vec<InsightNote>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InsightNote {
    pub question_id: &'static str,
    pub section: &'static str,
    pub note: &'static str,
}

const SCALE_STRENGTH_FLOOR: u8 = 4;
const SCALE_ATTENTION_CEILING: u8 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Signal {
    Strength,
    Improvement,
    Neutral,
}

fn signal(answer: &ResolvedAnswer) -> Signal {
    match answer {
        ResolvedAnswer::Choice(grade) if *grade == OptionGrade::Strongest => Signal::Strength,
        ResolvedAnswer::Choice(grade) if grade.needs_attention() => Signal::Improvement,
        ResolvedAnswer::Choice(_) => Signal::Neutral,
        ResolvedAnswer::Scale(value) if *value >= SCALE_STRENGTH_FLOOR => Signal::Strength,
        ResolvedAnswer::Scale(value) if *value < SCALE_ATTENTION_CEILING => Signal::Improvement,
        ResolvedAnswer::Scale(_) => Signal::Neutral,
        ResolvedAnswer::Choices(grades) => {
            if grades.is_empty() || grades.iter().any(|grade| grade.needs_attention()) {
                Signal::Improvement
            } else if grades.contains(&OptionGrade::Strongest) {
                Signal::Strength
            } else {
                Signal::Neutral
            }
        }
    }
}

pub(crate) fn analyze_responses(
    questionnaire: &Questionnaire,
    responses: &CompletedResponses,
) -> ResponseInsights {
    let mut insights = ResponseInsights::default();

    for entry in responses.entries() {
        let Some(question) = questionnaire.question(entry.question_id) else {
            continue;
        };
        let note = |text| InsightNote {
            question_id: question.id,
            section: question.section,
            note: text,
        };

        match signal(&entry.answer) {
            Signal::Strength => insights.strengths.push(note(question.strength)),
            Signal::Improvement => insights.improvements.push(note(question.improvement)),
            Signal::Neutral => {}
        }
    }

    insights
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_answers_split_at_four_and_three() {
        assert_eq!(signal(&ResolvedAnswer::Scale(5)), Signal::Strength);
        assert_eq!(signal(&ResolvedAnswer::Scale(4)), Signal::Strength);
        assert_eq!(signal(&ResolvedAnswer::Scale(3)), Signal::Neutral);
        assert_eq!(signal(&ResolvedAnswer::Scale(2)), Signal::Improvement);
    }

    #[test]
    fn weak_or_empty_selections_need_attention() {
        assert_eq!(signal(&ResolvedAnswer::Choices(Vec::new())), Signal::Improvement);
        assert_eq!(
            signal(&ResolvedAnswer::Choices(vec![
                OptionGrade::Strongest,
                OptionGrade::Weakest
            ])),
            Signal::Improvement
        );
        assert_eq!(
            signal(&ResolvedAnswer::Choices(vec![
                OptionGrade::Strongest,
                OptionGrade::Strong
            ])),
            Signal::Strength
        );
        assert_eq!(
            signal(&ResolvedAnswer::Choices(vec![OptionGrade::Strong])),
            Signal::Neutral
        );
    }

    #[test]
    fn single_choice_follows_the_option_grade() {
        assert_eq!(
            signal(&ResolvedAnswer::Choice(OptionGrade::Strongest)),
            Signal::Strength
        );
        assert_eq!(signal(&ResolvedAnswer::Choice(OptionGrade::Strong)), Signal::Neutral);
        assert_eq!(signal(&ResolvedAnswer::Choice(OptionGrade::Weak)), Signal::Improvement);
    }
}
