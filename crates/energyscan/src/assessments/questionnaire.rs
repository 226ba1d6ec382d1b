use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use super::domain::{Answer, Domain, OptionGrade, QuestionKind, QuestionSpec, ResponseSet};
use super::scoring::ClassificationScale;

/// Structural problems in a questionnaire definition.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuestionnaireError {
    #[error("questionnaire has no questions")]
    NoQuestions,
    #[error("question id '{0}' is used more than once")]
    DuplicateQuestion(&'static str),
    #[error("question '{0}' offers no options")]
    NoOptions(&'static str),
    #[error("question '{question_id}' offers '{value}' more than once")]
    DuplicateOption {
        question_id: &'static str,
        value: &'static str,
    },
    #[error("question '{question_id}' has an empty scale {min}..={max}")]
    EmptyScale {
        question_id: &'static str,
        min: u8,
        max: u8,
    },
    #[error("classification scale has no bands")]
    NoBands,
    #[error("classification scale leaves scores below {lowest_bound} unclassified")]
    UncoveredScores { lowest_bound: u32 },
    #[error("classification band '{label}' is out of descending order")]
    BandsOutOfOrder { label: &'static str },
}

/// Answers that do not fit the questionnaire they were collected for.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResponseError {
    #[error("{domain} has no question '{question_id}'")]
    UnknownQuestion { domain: Domain, question_id: String },
    #[error("question '{question_id}' has not been answered")]
    MissingAnswer { question_id: &'static str },
    #[error("'{value}' is not an option for question '{question_id}'")]
    UnknownOption {
        question_id: &'static str,
        value: String,
    },
    #[error("'{value}' is selected more than once for question '{question_id}'")]
    DuplicateSelection {
        question_id: &'static str,
        value: String,
    },
    #[error("{value} is outside {min}..={max} for question '{question_id}'")]
    ScaleOutOfRange {
        question_id: &'static str,
        value: i64,
        min: u8,
        max: u8,
    },
    #[error("question '{question_id}' expects a {expected}, got a {actual}")]
    WrongShape {
        question_id: &'static str,
        expected: &'static str,
        actual: &'static str,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct Questionnaire {
    domain: Domain,
    title: &'static str,
    intro: &'static str,
    questions: Vec<QuestionSpec>,
    classification: ClassificationScale,
}

impl Questionnaire {
    pub(crate) fn from_parts(
        domain: Domain,
        title: &'static str,
        intro: &'static str,
        questions: Vec<QuestionSpec>,
        classification: ClassificationScale,
    ) -> Self {
        Self {
            domain,
            title,
            intro,
            questions,
            classification,
        }
    }

    /// Build a questionnaire, rejecting duplicate ids, empty option lists, empty scales and
    /// classification scales that leave scores unclassified.
    pub fn try_new(
        domain: Domain,
        title: &'static str,
        intro: &'static str,
        questions: Vec<QuestionSpec>,
        classification: ClassificationScale,
    ) -> Result<Self, QuestionnaireError> {
        let questionnaire = Self::from_parts(domain, title, intro, questions, classification);
        questionnaire.validate()?;
        Ok(questionnaire)
    }

    pub fn validate(&self) -> Result<(), QuestionnaireError> {
        if self.questions.is_empty() {
            return Err(QuestionnaireError::NoQuestions);
        }

        let mut seen = BTreeSet::new();
        for question in &self.questions {
            if !seen.insert(question.id) {
                return Err(QuestionnaireError::DuplicateQuestion(question.id));
            }

            match &question.kind {
                QuestionKind::SingleChoice { options } | QuestionKind::MultiChoice { options } => {
                    if options.is_empty() {
                        return Err(QuestionnaireError::NoOptions(question.id));
                    }
                    let mut values = BTreeSet::new();
                    for option in options {
                        if !values.insert(option.value) {
                            return Err(QuestionnaireError::DuplicateOption {
                                question_id: question.id,
                                value: option.value,
                            });
                        }
                    }
                }
                QuestionKind::Scale { min, max } => {
                    if min > max {
                        return Err(QuestionnaireError::EmptyScale {
                            question_id: question.id,
                            min: *min,
                            max: *max,
                        });
                    }
                }
            }
        }

        self.classification.validate()
    }

    pub fn domain(&self) -> Domain {
        self.domain
    }

    pub fn title(&self) -> &'static str {
        self.title
    }

    pub fn intro(&self) -> &'static str {
        self.intro
    }

    pub fn questions(&self) -> &[QuestionSpec] {
        &self.questions
    }

    pub fn question(&self, question_id: &str) -> Option<&QuestionSpec> {
        self.questions
            .iter()
            .find(|question| question.id == question_id)
    }

    pub fn classification(&self) -> &ClassificationScale {
        &self.classification
    }

    pub fn max_score(&self) -> u32 {
        self.questions
            .iter()
            .map(|question| question.kind.max_contribution())
            .sum()
    }

    pub fn collector(&self) -> ResponseCollector<'_> {
        ResponseCollector {
            questionnaire: self,
            responses: ResponseSet::new(),
            resolved: BTreeMap::new(),
        }
    }

    /// Validate a whole response set at once, e.g. one decoded from stored history.
    pub fn complete(&self, responses: &ResponseSet) -> Result<CompletedResponses, ResponseError> {
        let mut collector = self.collector();
        for (question_id, answer) in responses.iter() {
            collector.record(question_id, answer.clone())?;
        }
        collector.finish()
    }
}

/// An answer checked against its question: every option resolved to its grade.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedAnswer {
    Choice(OptionGrade),
    Choices(Vec<OptionGrade>),
    Scale(u8),
}

impl ResolvedAnswer {
    pub fn contribution(&self) -> u32 {
        match self {
            Self::Choice(grade) => grade.weight(),
            Self::Choices(grades) => grades.iter().map(|grade| grade.weight()).sum(),
            Self::Scale(value) => u32::from(*value),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEntry {
    pub question_id: &'static str,
    pub answer: ResolvedAnswer,
}

/// Gathers answers one question at a time, rejecting anything the questionnaire does not
/// offer as soon as it is recorded.
#[derive(Debug)]
pub struct ResponseCollector<'q> {
    questionnaire: &'q Questionnaire,
    responses: ResponseSet,
    resolved: BTreeMap<&'static str, ResolvedAnswer>,
}

impl<'q> ResponseCollector<'q> {
    pub fn record(&mut self, question_id: &str, answer: Answer) -> Result<(), ResponseError> {
        let questionnaire = self.questionnaire;
        let question =
            questionnaire
                .question(question_id)
                .ok_or_else(|| ResponseError::UnknownQuestion {
                    domain: questionnaire.domain,
                    question_id: question_id.to_string(),
                })?;

        let resolved = resolve_answer(question, &answer)?;
        self.resolved.insert(question.id, resolved);
        self.responses.insert(question.id, answer);
        Ok(())
    }

    /// Questions that still need an answer, in presentation order.
    pub fn pending(&self) -> impl Iterator<Item = &'q QuestionSpec> + '_ {
        self.questionnaire
            .questions
            .iter()
            .filter(|question| !self.resolved.contains_key(question.id))
    }

    pub fn is_complete(&self) -> bool {
        self.pending().next().is_none()
    }

    pub fn responses(&self) -> &ResponseSet {
        &self.responses
    }

    pub fn finish(mut self) -> Result<CompletedResponses, ResponseError> {
        let mut entries = Vec::with_capacity(self.questionnaire.questions.len());
        for question in &self.questionnaire.questions {
            let answer = self
                .resolved
                .remove(question.id)
                .ok_or(ResponseError::MissingAnswer {
                    question_id: question.id,
                })?;
            entries.push(ResolvedEntry {
                question_id: question.id,
                answer,
            });
        }

        Ok(CompletedResponses {
            domain: self.questionnaire.domain,
            responses: self.responses,
            entries,
        })
    }
}

fn resolve_answer(
    question: &QuestionSpec,
    answer: &Answer,
) -> Result<ResolvedAnswer, ResponseError> {
    let wrong_shape = |expected: &'static str| ResponseError::WrongShape {
        question_id: question.id,
        expected,
        actual: answer.shape(),
    };

    match (&question.kind, answer) {
        (QuestionKind::SingleChoice { options }, Answer::Choice(value)) => options
            .iter()
            .find(|option| option.value == value.as_str())
            .map(|option| ResolvedAnswer::Choice(option.grade))
            .ok_or_else(|| ResponseError::UnknownOption {
                question_id: question.id,
                value: value.clone(),
            }),
        (QuestionKind::MultiChoice { options }, Answer::Choices(values)) => {
            let mut seen = BTreeSet::new();
            let mut grades = Vec::with_capacity(values.len());
            for value in values {
                if !seen.insert(value.as_str()) {
                    return Err(ResponseError::DuplicateSelection {
                        question_id: question.id,
                        value: value.clone(),
                    });
                }
                let option = options
                    .iter()
                    .find(|option| option.value == value.as_str())
                    .ok_or_else(|| ResponseError::UnknownOption {
                        question_id: question.id,
                        value: value.clone(),
                    })?;
                grades.push(option.grade);
            }
            Ok(ResolvedAnswer::Choices(grades))
        }
        (QuestionKind::Scale { min, max }, Answer::Scale(value)) => {
            if *value < i64::from(*min) || *value > i64::from(*max) {
                return Err(ResponseError::ScaleOutOfRange {
                    question_id: question.id,
                    value: *value,
                    min: *min,
                    max: *max,
                });
            }
            u8::try_from(*value)
                .map(ResolvedAnswer::Scale)
                .map_err(|_| ResponseError::ScaleOutOfRange {
                    question_id: question.id,
                    value: *value,
                    min: *min,
                    max: *max,
                })
        }
        (QuestionKind::SingleChoice { .. }, _) => Err(wrong_shape("string")),
        (QuestionKind::MultiChoice { .. }, _) => Err(wrong_shape("list of strings")),
        (QuestionKind::Scale { .. }, _) => Err(wrong_shape("number")),
    }
}

/// A response set validated against its questionnaire. Only this type can be scored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedResponses {
    domain: Domain,
    responses: ResponseSet,
    entries: Vec<ResolvedEntry>,
}

impl CompletedResponses {
    pub fn domain(&self) -> Domain {
        self.domain
    }

    pub fn responses(&self) -> &ResponseSet {
        &self.responses
    }

    /// Resolved answers in questionnaire order.
    pub fn entries(&self) -> &[ResolvedEntry] {
        &self.entries
    }

    pub fn into_responses(self) -> ResponseSet {
        self.responses
    }
}
