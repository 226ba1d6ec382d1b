use serde::Serialize;

use super::domain::{Domain, ScoredRecord};
use super::scoring::{Classification, ClassificationScale, PerformanceLevel};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LevelCount {
    pub level: PerformanceLevel,
    pub level_label: &'static str,
    pub submissions: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LatestSubmission {
    pub index: usize,
    pub score: u32,
    pub classification: Classification,
}

/// Aggregate view of one domain's history, based on the stored scores.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistorySummary {
    pub domain: Domain,
    pub submissions: usize,
    pub min_score: Option<u32>,
    pub max_score: Option<u32>,
    pub mean_score: Option<f64>,
    pub latest: Option<LatestSubmission>,
    pub levels: Vec<LevelCount>,
}

impl HistorySummary {
    pub fn from_records(
        domain: Domain,
        scale: &ClassificationScale,
        records: &[ScoredRecord],
    ) -> Self {
        let scores: Vec<u32> = records.iter().map(|record| record.score).collect();
        let mean_score = if scores.is_empty() {
            None
        } else {
            let total: u64 = scores.iter().map(|score| u64::from(*score)).sum();
            Some(total as f64 / scores.len() as f64)
        };

        let levels = PerformanceLevel::ordered()
            .into_iter()
            .rev()
            .map(|level| LevelCount {
                level,
                level_label: level.label(),
                submissions: scores
                    .iter()
                    .filter(|score| scale.classify(**score).level == level)
                    .count(),
            })
            .collect();

        let latest = scores.last().map(|score| LatestSubmission {
            index: scores.len() - 1,
            score: *score,
            classification: scale.classify(*score),
        });

        Self {
            domain,
            submissions: scores.len(),
            min_score: scores.iter().copied().min(),
            max_score: scores.iter().copied().max(),
            mean_score,
            latest,
            levels,
        }
    }
}
