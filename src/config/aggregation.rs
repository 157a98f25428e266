//! Aggregation engine tunables.

use serde::Deserialize;

use super::error::ConfigError;

/// Knobs for the aggregation pipeline.
#[derive(Debug, Clone, Deserialize)]
pub struct AggregationConfig {
    /// Row cap for open-text samples; results are example cards, not a
    /// full export.
    #[serde(default = "default_open_text_sample_limit")]
    pub open_text_sample_limit: usize,

    /// Threshold (percent) under which the presentation layer may hide a
    /// funnel segment's label. The core reports raw percentages and only
    /// forwards this value.
    #[serde(default = "default_label_suppression_threshold_pct")]
    pub label_suppression_threshold_pct: f64,

    /// Days added past "now" when a running survey has no end date, so
    /// same-day responses fall inside the window.
    #[serde(default = "default_end_window_padding_days")]
    pub end_window_padding_days: i64,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            open_text_sample_limit: default_open_text_sample_limit(),
            label_suppression_threshold_pct: default_label_suppression_threshold_pct(),
            end_window_padding_days: default_end_window_padding_days(),
        }
    }
}

impl AggregationConfig {
    /// Validates value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.open_text_sample_limit == 0 {
            return Err(ConfigError::invalid(
                "aggregation.open_text_sample_limit",
                "must be at least 1",
            ));
        }
        if !(0.0..=100.0).contains(&self.label_suppression_threshold_pct) {
            return Err(ConfigError::invalid(
                "aggregation.label_suppression_threshold_pct",
                "must be between 0 and 100",
            ));
        }
        if self.end_window_padding_days < 0 {
            return Err(ConfigError::invalid(
                "aggregation.end_window_padding_days",
                "must not be negative",
            ));
        }
        Ok(())
    }
}

fn default_open_text_sample_limit() -> usize {
    20
}

fn default_label_suppression_threshold_pct() -> f64 {
    4.0
}

fn default_end_window_padding_days() -> i64 {
    1
}
