//! Query execution port: structured analytical queries over captured
//! response events.
//!
//! The core does not assume a query language. It hands the adapter a
//! structured description and gets back ordered rows of scalars; column
//! meaning is positional per query shape, a contract between the query
//! builder and the post-processor rather than a generic schema.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::domain::foundation::SurveyId;
use crate::domain::survey::ResponseField;

/// Event captured when a survey was displayed.
pub const SURVEY_SHOWN_EVENT: &str = "survey shown";
/// Event captured when a survey was dismissed without answering.
pub const SURVEY_DISMISSED_EVENT: &str = "survey dismissed";
/// Event captured when a survey response was submitted.
pub const SURVEY_SENT_EVENT: &str = "survey sent";

/// Inclusive aggregation window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// A response field as an ordered key list, stable key first.
///
/// Adapters must coalesce the keys in this order; it encodes the
/// stable-id-over-positional preference from
/// [`ResponseField`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoalesceField {
    pub keys: Vec<String>,
}

impl From<&ResponseField> for CoalesceField {
    fn from(field: &ResponseField) -> Self {
        Self {
            keys: field.keys().into_iter().map(str::to_string).collect(),
        }
    }
}

/// Predicate operator for answer filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterOperator {
    Exact,
    IContains,
    Regex,
}

/// A per-question predicate narrowing the aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyFilter {
    pub field: CoalesceField,
    pub operator: FilterOperator,
    pub values: Vec<Value>,
}

/// The shape of the requested aggregation. Determines the positional row
/// layout the post-processor expects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum QueryShape {
    /// Rows: `[response_value, count]`.
    GroupCount { field: CoalesceField },
    /// Rows: `[iteration, response_value, count]`.
    GroupCountByIteration { field: CoalesceField },
    /// The field holds an array; explode it before grouping so one event
    /// can contribute to several buckets. Rows: `[choice_value, count]`.
    GroupCountFlattened { field: CoalesceField },
    /// Row-level sample of non-empty (trimmed) responses, capped at
    /// `limit`. Rows: `[distinct_id, response, properties, person_properties]`.
    SampleRows { field: CoalesceField, limit: usize },
}

/// A parameterized analytical query for one question's responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseQuery {
    pub survey_id: SurveyId,
    /// Event name the rows are scoped to.
    pub event: String,
    pub window: DateWindow,
    /// Iteration filter for recurring surveys.
    pub iteration: Option<u32>,
    /// Active answer filters, applied as additional predicates.
    pub filters: Vec<PropertyFilter>,
    pub shape: QueryShape,
}

/// One result row: an ordered tuple of scalars.
pub type QueryRow = Vec<Value>;

/// Errors surfaced by the query boundary or by row interpretation.
#[derive(Debug, Clone, Error)]
pub enum QueryError {
    #[error("Query execution failed: {0}")]
    Execution(String),

    #[error("Malformed result row at index {row}: {reason}")]
    MalformedRow { row: usize, reason: String },
}

/// Executes structured queries against the captured event dataset.
///
/// Retry and backoff live behind this boundary, not in the core.
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    async fn execute(&self, query: &ResponseQuery) -> Result<Vec<QueryRow>, QueryError>;
}
