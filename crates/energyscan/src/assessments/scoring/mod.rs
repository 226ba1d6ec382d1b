mod classification;
mod insights;
mod rules;

pub use classification::{
    Classification, ClassificationBand, ClassificationScale, PerformanceLevel,
};
pub use insights::{InsightNote, ResponseInsights};

use serde::Serialize;

use super::catalog::AssessmentCatalog;
use super::domain::{Domain, ResponseSet};
use super::questionnaire::{CompletedResponses, Questionnaire, QuestionnaireError, ResponseError};

/// Stateless scorer applying each domain's weight table and classification bands.
#[derive(Debug, Clone)]
pub struct AssessmentEngine {
    catalog: AssessmentCatalog,
}

impl AssessmentEngine {
    /// Every questionnaire and classification scale is checked here, once.
    pub fn new(catalog: AssessmentCatalog) -> Result<Self, QuestionnaireError> {
        catalog.validate()?;
        Ok(Self { catalog })
    }

    pub fn standard() -> Result<Self, QuestionnaireError> {
        Self::new(AssessmentCatalog::standard())
    }

    pub fn questionnaire(&self, domain: Domain) -> &Questionnaire {
        self.catalog.questionnaire(domain)
    }

    pub fn score(&self, responses: &CompletedResponses) -> AssessmentOutcome {
        let questionnaire = self.questionnaire(responses.domain());
        let (components, total_score) = rules::score_responses(responses);
        let classification = questionnaire.classification().classify(total_score);

        AssessmentOutcome {
            domain: responses.domain(),
            total_score,
            max_score: questionnaire.max_score(),
            classification,
            components,
        }
    }

    /// Validate and score in one step.
    pub fn evaluate(
        &self,
        domain: Domain,
        responses: &ResponseSet,
    ) -> Result<(CompletedResponses, AssessmentOutcome), ResponseError> {
        let completed = self.questionnaire(domain).complete(responses)?;
        let outcome = self.score(&completed);
        Ok((completed, outcome))
    }

    pub fn insights(&self, responses: &CompletedResponses) -> ResponseInsights {
        insights::analyze_responses(self.questionnaire(responses.domain()), responses)
    }
}

/// Contribution of one question to the total, kept for transparent audits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreComponent {
    pub question_id: &'static str,
    pub score: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssessmentOutcome {
    pub domain: Domain,
    pub total_score: u32,
    pub max_score: u32,
    pub classification: Classification,
    pub components: Vec<ScoreComponent>,
}
