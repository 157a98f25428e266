//! Funnel statistics: shown / dismissed / sent counts and derived rates.

use serde::{Deserialize, Serialize};

/// Which count source feeds the funnel: one row per person, or one row
/// per event. The formulas are identical; the caller picks the feed and
/// the choice is recorded on the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CountSource {
    UniquePersons,
    TotalEvents,
}

/// Raw funnel counts for a survey within a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunnelCounts {
    pub shown: u64,
    pub dismissed: u64,
    pub sent: u64,
}

/// Fixed-shape funnel result: absolute counts, raw percentages of the
/// shown total, and preformatted display strings.
///
/// The core always supplies the raw percentage; suppressing labels under
/// a display threshold is the presentation layer's call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunnelStats {
    pub source: CountSource,
    pub shown: u64,
    /// Shown but neither dismissed nor answered; clamped at zero since
    /// inconsistent underlying data can make the difference negative.
    pub only_seen: u64,
    pub dismissed: u64,
    pub sent: u64,
    /// `sent / shown * 100`; 0.0 when nothing was shown.
    pub response_rate: f64,
    /// `dismissed / shown * 100`; 0.0 when nothing was shown.
    pub dismissal_rate: f64,
    /// `only_seen / shown * 100`; 0.0 when nothing was shown.
    pub only_seen_rate: f64,
    /// Display strings like `"40.0%"` matching the rates above.
    pub response_rate_label: String,
    pub dismissal_rate_label: String,
    pub only_seen_rate_label: String,
    /// Configured threshold (percent) under which the presentation layer
    /// may hide a segment's label. Forwarded untouched; the rates above
    /// are never pre-suppressed.
    pub label_suppression_threshold_pct: f64,
}
