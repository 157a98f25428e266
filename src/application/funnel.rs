//! Funnel statistics derivation.

use crate::config::AggregationConfig;
use crate::domain::results::{CountSource, FunnelCounts, FunnelStats};

/// Computes shown/dismissed/sent funnel stats and derived rates.
#[derive(Debug, Clone, Copy)]
pub struct FunnelCalculator {
    label_suppression_threshold_pct: f64,
}

impl Default for FunnelCalculator {
    fn default() -> Self {
        Self::new(&AggregationConfig::default())
    }
}

impl FunnelCalculator {
    pub fn new(config: &AggregationConfig) -> Self {
        Self {
            label_suppression_threshold_pct: config.label_suppression_threshold_pct,
        }
    }

    /// Derives the fixed-shape funnel record from raw counts.
    ///
    /// `only_seen` is clamped at zero: dismiss and sent events can exceed
    /// shown events when the underlying capture is inconsistent. All
    /// rates guard the zero-shown case and report 0 instead of dividing.
    pub fn compute(&self, counts: FunnelCounts, source: CountSource) -> FunnelStats {
        let FunnelCounts {
            shown,
            dismissed,
            sent,
        } = counts;
        let only_seen = shown.saturating_sub(dismissed + sent);

        let response_rate = rate(sent, shown);
        let dismissal_rate = rate(dismissed, shown);
        let only_seen_rate = rate(only_seen, shown);

        FunnelStats {
            source,
            shown,
            only_seen,
            dismissed,
            sent,
            response_rate,
            dismissal_rate,
            only_seen_rate,
            response_rate_label: format_rate(response_rate),
            dismissal_rate_label: format_rate(dismissal_rate),
            only_seen_rate_label: format_rate(only_seen_rate),
            label_suppression_threshold_pct: self.label_suppression_threshold_pct,
        }
    }
}

fn rate(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    part as f64 / whole as f64 * 100.0
}

fn format_rate(rate: f64) -> String {
    format!("{rate:.1}%")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_counts_produce_expected_rates() {
        let stats = FunnelCalculator::default().compute(
            FunnelCounts {
                shown: 250,
                dismissed: 30,
                sent: 100,
            },
            CountSource::UniquePersons,
        );
        assert_eq!(stats.only_seen, 120);
        assert_eq!(stats.response_rate, 40.0);
        assert_eq!(stats.response_rate_label, "40.0%");
        assert_eq!(stats.dismissal_rate, 12.0);
    }

    #[test]
    fn zero_shown_reports_zero_rates_not_errors() {
        let stats = FunnelCalculator::default().compute(
            FunnelCounts {
                shown: 0,
                dismissed: 0,
                sent: 0,
            },
            CountSource::TotalEvents,
        );
        assert_eq!(stats.response_rate, 0.0);
        assert_eq!(stats.dismissal_rate, 0.0);
        assert_eq!(stats.only_seen_rate, 0.0);
        assert_eq!(stats.response_rate_label, "0.0%");
    }

    #[test]
    fn only_seen_is_clamped_on_inconsistent_data() {
        let stats = FunnelCalculator::default().compute(
            FunnelCounts {
                shown: 10,
                dismissed: 8,
                sent: 5,
            },
            CountSource::TotalEvents,
        );
        assert_eq!(stats.only_seen, 0);
    }

    #[test]
    fn count_source_is_recorded_on_the_output() {
        let calc = FunnelCalculator::default();
        let counts = FunnelCounts {
            shown: 4,
            dismissed: 1,
            sent: 1,
        };
        assert_eq!(
            calc.compute(counts, CountSource::UniquePersons).source,
            CountSource::UniquePersons
        );
        assert_eq!(
            calc.compute(counts, CountSource::TotalEvents).source,
            CountSource::TotalEvents
        );
    }

    #[test]
    fn small_segments_keep_their_raw_percentage() {
        // 2% is under the default display threshold; the core still
        // reports it and only forwards the threshold for the
        // presentation layer to apply.
        let stats = FunnelCalculator::default().compute(
            FunnelCounts {
                shown: 100,
                dismissed: 2,
                sent: 98,
            },
            CountSource::UniquePersons,
        );
        assert_eq!(stats.dismissal_rate, 2.0);
        assert_eq!(stats.dismissal_rate_label, "2.0%");
        assert_eq!(stats.label_suppression_threshold_pct, 4.0);
    }

    #[test]
    fn configured_threshold_is_forwarded_untouched() {
        let config = AggregationConfig {
            label_suppression_threshold_pct: 7.5,
            ..Default::default()
        };
        let stats = FunnelCalculator::new(&config).compute(
            FunnelCounts {
                shown: 100,
                dismissed: 5,
                sent: 90,
            },
            CountSource::UniquePersons,
        );
        assert_eq!(stats.label_suppression_threshold_pct, 7.5);
        // Below-threshold segments are not pre-suppressed.
        assert_eq!(stats.dismissal_rate, 5.0);
        assert_eq!(stats.dismissal_rate_label, "5.0%");
    }
}
