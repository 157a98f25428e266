//! Rating distributions over a fixed bucket array.

use serde::{Deserialize, Serialize};

use crate::domain::survey::RatingScale;

/// Counts per rating value, sized to the question's scale.
///
/// Scale 10 holds 11 buckets (values 0-10); other scales hold one bucket
/// per value, with value `v` stored at index `v - 1`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingDistribution {
    pub scale: RatingScale,
    pub buckets: Vec<u64>,
    pub total: u64,
}

impl RatingDistribution {
    /// An empty distribution for the given scale.
    pub fn empty(scale: RatingScale) -> Self {
        Self {
            scale,
            buckets: vec![0; scale.bucket_count()],
            total: 0,
        }
    }

    /// Adds `count` responses with rating `value`. Returns false when the
    /// value lies outside the scale (the caller decides whether that is a
    /// malformed row or ignorable noise).
    pub fn record(&mut self, value: i64, count: u64) -> bool {
        match self.scale.bucket_index(value) {
            Some(index) => {
                self.buckets[index] += count;
                self.total += count;
                true
            }
            None => false,
        }
    }

    /// Fraction of responses in the bucket at `index`, 0.0 when empty.
    pub fn fraction(&self, index: usize) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.buckets
            .get(index)
            .map(|&count| count as f64 / self.total as f64)
            .unwrap_or(0.0)
    }
}
