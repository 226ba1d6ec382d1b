use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One of the four questionnaire topics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    Awareness,
    Routine,
    Wellbeing,
    Activities,
}

impl Domain {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::Awareness,
            Self::Routine,
            Self::Wellbeing,
            Self::Activities,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Awareness => "Awareness",
            Self::Routine => "Routine",
            Self::Wellbeing => "Well-being",
            Self::Activities => "Activities",
        }
    }

    pub const fn slug(self) -> &'static str {
        match self {
            Self::Awareness => "awareness",
            Self::Routine => "routine",
            Self::Wellbeing => "wellbeing",
            Self::Activities => "activities",
        }
    }

    /// Name of the JSON file holding this domain's submission history.
    pub const fn history_file(self) -> &'static str {
        match self {
            Self::Awareness => "awareness.json",
            Self::Routine => "routine.json",
            Self::Wellbeing => "wellbeing.json",
            Self::Activities => "activities.json",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown assessment domain '{0}'")]
pub struct UnknownDomain(pub String);

impl FromStr for Domain {
    type Err = UnknownDomain;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "awareness" => Ok(Self::Awareness),
            "routine" => Ok(Self::Routine),
            "wellbeing" | "well-being" | "well_being" => Ok(Self::Wellbeing),
            "activities" => Ok(Self::Activities),
            other => Err(UnknownDomain(other.to_string())),
        }
    }
}

/// Tag attached to every choice option; the weight table is this enum's exhaustive match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionGrade {
    Weakest,
    Weak,
    Strong,
    Strongest,
}

impl OptionGrade {
    pub const fn weight(self) -> u32 {
        match self {
            Self::Strongest => 4,
            Self::Strong => 3,
            Self::Weak => 2,
            Self::Weakest => 1,
        }
    }

    /// Grades for lettered options in presentation order (A, B, C, D).
    pub const fn lettered() -> [Self; 4] {
        [Self::Strongest, Self::Strong, Self::Weak, Self::Weakest]
    }

    pub const fn needs_attention(self) -> bool {
        matches!(self, Self::Weak | Self::Weakest)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChoiceOption {
    pub value: &'static str,
    pub grade: OptionGrade,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QuestionKind {
    SingleChoice { options: Vec<ChoiceOption> },
    MultiChoice { options: Vec<ChoiceOption> },
    Scale { min: u8, max: u8 },
}

impl QuestionKind {
    pub const fn label(&self) -> &'static str {
        match self {
            Self::SingleChoice { .. } => "single choice",
            Self::MultiChoice { .. } => "multiple choice",
            Self::Scale { .. } => "scale",
        }
    }

    pub fn options(&self) -> &[ChoiceOption] {
        match self {
            Self::SingleChoice { options } | Self::MultiChoice { options } => options,
            Self::Scale { .. } => &[],
        }
    }

    /// Highest contribution a single answer to this question can make.
    pub fn max_contribution(&self) -> u32 {
        match self {
            Self::SingleChoice { options } => options
                .iter()
                .map(|option| option.grade.weight())
                .max()
                .unwrap_or(0),
            Self::MultiChoice { options } => {
                options.iter().map(|option| option.grade.weight()).sum()
            }
            Self::Scale { max, .. } => u32::from(*max),
        }
    }
}

/// A single form field: prompt, answer kind, and the notes used when analysing answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionSpec {
    pub id: &'static str,
    pub section: &'static str,
    pub prompt: &'static str,
    pub kind: QuestionKind,
    pub strength: &'static str,
    pub improvement: &'static str,
}

impl QuestionSpec {
    /// Resolve what a person typed into one of this question's options. Accepts a 1-based
    /// option number, a case-insensitive prefix of exactly one option value ("a", "Yes",
    /// "n"), or the letter of a lettered option ("c" for "C. ...").
    pub fn resolve_option(&self, token: &str) -> Option<&ChoiceOption> {
        let options = self.kind.options();
        let token = token.trim();
        if token.is_empty() {
            return None;
        }

        if let Ok(number) = token.parse::<usize>() {
            return number.checked_sub(1).and_then(|index| options.get(index));
        }

        let lowered = token.to_lowercase();
        let mut prefixed = options
            .iter()
            .filter(|option| option.value.to_lowercase().starts_with(&lowered));
        if let (Some(found), None) = (prefixed.next(), prefixed.next()) {
            return Some(found);
        }

        let mut chars = token.chars();
        match (chars.next(), chars.next()) {
            (Some(letter), None) if letter.is_ascii_alphabetic() => {
                let label = format!("{}.", letter.to_ascii_uppercase());
                options.iter().find(|option| option.value.starts_with(&label))
            }
            _ => None,
        }
    }
}

/// Persisted form of one answer: a number for scales, a string for single choice, and a
/// list of strings for multiple choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Answer {
    Scale(i64),
    Choice(String),
    Choices(Vec<String>),
}

impl Answer {
    pub fn choice(value: impl Into<String>) -> Self {
        Self::Choice(value.into())
    }

    pub fn choices<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Choices(values.into_iter().map(Into::into).collect())
    }

    pub const fn shape(&self) -> &'static str {
        match self {
            Self::Scale(_) => "number",
            Self::Choice(_) => "string",
            Self::Choices(_) => "list of strings",
        }
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Answer::Scale(value) => write!(f, "{value}"),
            Answer::Choice(value) => f.write_str(value),
            Answer::Choices(values) => f.write_str(&values.join("; ")),
        }
    }
}

/// Answers keyed by question id. Owned by the caller while the form is filled in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResponseSet(BTreeMap<String, Answer>);

impl ResponseSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, question_id: impl Into<String>, answer: Answer) -> Self {
        self.insert(question_id, answer);
        self
    }

    pub fn insert(&mut self, question_id: impl Into<String>, answer: Answer) -> Option<Answer> {
        self.0.insert(question_id.into(), answer)
    }

    pub fn get(&self, question_id: &str) -> Option<&Answer> {
        self.0.get(question_id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Answer)> {
        self.0.iter().map(|(id, answer)| (id.as_str(), answer))
    }
}

/// Persisted `{score, responses}` pair. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredRecord {
    pub score: u32,
    pub responses: ResponseSet,
}
