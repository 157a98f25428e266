//! Typed per-question statistics produced by the aggregation pipeline.

mod choices;
mod funnel;
mod nps;
mod open_text;
mod rating;

pub use choices::{ChoiceBreakdown, ChoiceCount};
pub use funnel::{CountSource, FunnelCounts, FunnelStats};
pub use nps::{NpsBreakdown, NpsScore, NpsTrend, NpsTrendPoint};
pub use open_text::{OpenTextEntry, OpenTextSample};
pub use rating::RatingDistribution;

use serde::{Deserialize, Serialize};

/// The statistic computed for one question, tagged by question kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QuestionStats {
    Rating {
        distribution: RatingDistribution,
        /// Present only for scale-10 questions.
        nps: Option<NpsScore>,
    },
    /// Per-iteration NPS trend for a recurring scale-10 rating question.
    RecurringNps { trend: NpsTrend },
    SingleChoice { breakdown: ChoiceBreakdown },
    MultipleChoice { breakdown: ChoiceBreakdown },
    OpenText { sample: OpenTextSample },
}
