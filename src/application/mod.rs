//! Application layer - query construction, post-processing and the
//! concurrent aggregation orchestrator.

pub mod aggregator;
pub mod funnel;
pub mod postprocess;
pub mod query_builder;

pub use aggregator::{AggregationError, AggregationParams, AnswerFilter, SurveyAnalytics};
pub use funnel::FunnelCalculator;
pub use query_builder::QueryBuilder;
