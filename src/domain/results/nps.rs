//! Net Promoter Score derivation from 0-10 rating distributions.

use serde::{Deserialize, Serialize};

use super::RatingDistribution;
use crate::domain::survey::RatingScale;

/// NPS result: a numeric score, or an explicit no-data sentinel when the
/// distribution is empty. Never NaN.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "score", rename_all = "snake_case")]
pub enum NpsScore {
    Score(f64),
    NoData,
}

/// Promoter/passive/detractor counts accumulated from a 0-10 rating.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NpsBreakdown {
    pub promoters: u64,
    pub passives: u64,
    pub detractors: u64,
}

impl NpsBreakdown {
    /// Classifies one `(response, count)` pair: 9-10 promoter, 7-8
    /// passive, 0-6 detractor. Values outside 0-10 are ignored.
    pub fn record(&mut self, response: i64, count: u64) {
        match response {
            9..=10 => self.promoters += count,
            7..=8 => self.passives += count,
            0..=6 => self.detractors += count,
            _ => {}
        }
    }

    /// Total classified responses.
    pub fn total(&self) -> u64 {
        self.promoters + self.passives + self.detractors
    }

    /// `(promoters - detractors) / total * 100`, rounded to one decimal;
    /// the no-data sentinel when the total is zero.
    pub fn score(&self) -> NpsScore {
        let total = self.total();
        if total == 0 {
            return NpsScore::NoData;
        }
        let raw = (self.promoters as f64 - self.detractors as f64) / total as f64 * 100.0;
        NpsScore::Score((raw * 10.0).round() / 10.0)
    }
}

impl NpsScore {
    /// Derives the score from an 11-bucket scale-10 distribution. Returns
    /// `None` for any other scale (NPS is only defined on 0-10 ratings).
    pub fn from_distribution(distribution: &RatingDistribution) -> Option<NpsScore> {
        if distribution.scale != RatingScale::Ten {
            return None;
        }
        let mut breakdown = NpsBreakdown::default();
        for (value, &count) in distribution.buckets.iter().enumerate() {
            breakdown.record(value as i64, count);
        }
        Some(breakdown.score())
    }
}

/// One point of a recurring-survey NPS trend.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NpsTrendPoint {
    /// 1-based iteration number.
    pub iteration: u32,
    pub score: NpsScore,
    pub total: u64,
}

/// NPS per iteration of a recurring survey, ascending by iteration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NpsTrend {
    pub points: Vec<NpsTrendPoint>,
}
