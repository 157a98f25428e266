//! Choice-question breakdowns.

use serde::{Deserialize, Serialize};

/// One choice label with its response count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoiceCount {
    pub label: String,
    pub count: u64,
    /// `count / total`; 0.0 on an empty breakdown.
    pub fraction: f64,
}

/// Counts per choice label for single- and multiple-choice questions.
///
/// For multiple-choice questions every declared option appears, zero-
/// filled when unobserved, except a trailing open-text choice which is
/// never synthesized (it stands for arbitrary text, not a fixed option).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChoiceBreakdown {
    pub entries: Vec<ChoiceCount>,
    pub total: u64,
}

impl ChoiceBreakdown {
    /// Builds a breakdown from `(label, count)` pairs, computing the
    /// per-label fraction against the summed total.
    pub fn from_counts(counts: Vec<(String, u64)>) -> Self {
        let total: u64 = counts.iter().map(|(_, count)| count).sum();
        let entries = counts
            .into_iter()
            .map(|(label, count)| ChoiceCount {
                label,
                count,
                fraction: if total == 0 {
                    0.0
                } else {
                    count as f64 / total as f64
                },
            })
            .collect();
        Self { entries, total }
    }

    /// Count for a label, if present.
    pub fn count_for(&self, label: &str) -> Option<u64> {
        self.entries
            .iter()
            .find(|entry| entry.label == label)
            .map(|entry| entry.count)
    }
}
