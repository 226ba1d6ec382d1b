use serde::{Deserialize, Serialize};

use super::super::questionnaire::QuestionnaireError;

/// Qualitative tier, ordered from weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PerformanceLevel {
    VeryLow,
    Low,
    Moderate,
    Peak,
}

impl PerformanceLevel {
    pub const fn ordered() -> [Self; 4] {
        [Self::VeryLow, Self::Low, Self::Moderate, Self::Peak]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::VeryLow => "Very Low",
            Self::Low => "Low",
            Self::Moderate => "Moderate",
            Self::Peak => "Peak",
        }
    }
}

/// Inclusive lower bound of a tier together with the wording shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassificationBand {
    pub min_score: u32,
    pub level: PerformanceLevel,
    pub label: &'static str,
    pub message: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub level: PerformanceLevel,
    pub label: &'static str,
    pub message: &'static str,
}

impl From<&ClassificationBand> for Classification {
    fn from(band: &ClassificationBand) -> Self {
        Self {
            level: band.level,
            label: band.label,
            message: band.message,
        }
    }
}

const UNCLASSIFIED: Classification = Classification {
    level: PerformanceLevel::VeryLow,
    label: "Unclassified",
    message: "No classification bands are configured for this assessment.",
};

/// Bands ordered by descending `min_score`; the first band whose bound the score reaches wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ClassificationScale {
    bands: Vec<ClassificationBand>,
}

impl ClassificationScale {
    pub(crate) fn from_bands(bands: Vec<ClassificationBand>) -> Self {
        Self { bands }
    }

    pub fn try_new(bands: Vec<ClassificationBand>) -> Result<Self, QuestionnaireError> {
        let scale = Self::from_bands(bands);
        scale.validate()?;
        Ok(scale)
    }

    pub fn validate(&self) -> Result<(), QuestionnaireError> {
        let last = self.bands.last().ok_or(QuestionnaireError::NoBands)?;
        if last.min_score != 0 {
            return Err(QuestionnaireError::UncoveredScores {
                lowest_bound: last.min_score,
            });
        }

        for pair in self.bands.windows(2) {
            let (upper, lower) = (&pair[0], &pair[1]);
            if upper.min_score <= lower.min_score || upper.level <= lower.level {
                return Err(QuestionnaireError::BandsOutOfOrder {
                    label: lower.label,
                });
            }
        }

        Ok(())
    }

    pub fn bands(&self) -> &[ClassificationBand] {
        &self.bands
    }

    pub fn classify(&self, score: u32) -> Classification {
        self.bands
            .iter()
            .find(|band| score >= band.min_score)
            .or_else(|| self.bands.last())
            .map(Classification::from)
            .unwrap_or(UNCLASSIFIED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn four_tier_scale() -> ClassificationScale {
        ClassificationScale::try_new(vec![
            ClassificationBand {
                min_score: 28,
                level: PerformanceLevel::Peak,
                label: "Peak",
                message: "",
            },
            ClassificationBand {
                min_score: 20,
                level: PerformanceLevel::Moderate,
                label: "Moderate",
                message: "",
            },
            ClassificationBand {
                min_score: 12,
                level: PerformanceLevel::Low,
                label: "Low",
                message: "",
            },
            ClassificationBand {
                min_score: 0,
                level: PerformanceLevel::VeryLow,
                label: "Very Low",
                message: "",
            },
        ])
        .expect("valid scale")
    }

    #[test]
    fn threshold_scores_resolve_to_the_upper_tier() {
        let scale = four_tier_scale();
        assert_eq!(scale.classify(27).level, PerformanceLevel::Moderate);
        assert_eq!(scale.classify(28).level, PerformanceLevel::Peak);
        assert_eq!(scale.classify(19).level, PerformanceLevel::Low);
        assert_eq!(scale.classify(20).level, PerformanceLevel::Moderate);
        assert_eq!(scale.classify(11).level, PerformanceLevel::VeryLow);
        assert_eq!(scale.classify(12).level, PerformanceLevel::Low);
        assert_eq!(scale.classify(0).level, PerformanceLevel::VeryLow);
    }

    #[test]
    fn classification_is_monotonic_in_score() {
        let scale = four_tier_scale();
        let levels: Vec<PerformanceLevel> = (0..=60)
            .map(|score| scale.classify(score).level)
            .collect();
        assert!(levels.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[test]
    fn rejects_scales_without_a_zero_floor() {
        let result = ClassificationScale::try_new(vec![ClassificationBand {
            min_score: 10,
            level: PerformanceLevel::Peak,
            label: "Peak",
            message: "",
        }]);
        assert_eq!(
            result,
            Err(QuestionnaireError::UncoveredScores { lowest_bound: 10 })
        );
    }

    #[test]
    fn rejects_bands_out_of_order() {
        let result = ClassificationScale::try_new(vec![
            ClassificationBand {
                min_score: 10,
                level: PerformanceLevel::Low,
                label: "Low",
                message: "",
            },
            ClassificationBand {
                min_score: 0,
                level: PerformanceLevel::Peak,
                label: "Peak",
                message: "",
            },
        ]);
        assert_eq!(
            result,
            Err(QuestionnaireError::BandsOutOfOrder { label: "Peak" })
        );
        assert_eq!(
            ClassificationScale::try_new(Vec::new()),
            Err(QuestionnaireError::NoBands)
        );
    }
}
