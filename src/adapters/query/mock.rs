//! Scripted query executor for tests and demos.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Mutex, RwLock};

use crate::ports::{QueryError, QueryExecutor, QueryRow, QueryShape, ResponseQuery};

/// Scripted [`QueryExecutor`]: responses are registered per response-field
/// key and every executed query is recorded for assertions.
///
/// The key matched is the *first* key of the query's coalesce field, i.e.
/// the stable key when one exists, which mirrors how a real adapter
/// resolves the field.
///
/// # Panics
///
/// Methods panic if internal locks are poisoned; this adapter is for
/// tests and demos only.
#[derive(Default)]
pub struct MockQueryExecutor {
    responses: RwLock<HashMap<String, Vec<QueryRow>>>,
    failures: RwLock<HashMap<String, String>>,
    executed: Mutex<Vec<ResponseQuery>>,
}

impl MockQueryExecutor {
    /// Creates an executor that answers every query with no rows.
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts the rows returned for queries on `field_key`.
    pub fn script(&self, field_key: &str, rows: Vec<QueryRow>) {
        self.responses
            .write()
            .expect("MockQueryExecutor: responses lock poisoned")
            .insert(field_key.to_string(), rows);
    }

    /// Makes queries on `field_key` fail with `message`.
    pub fn fail(&self, field_key: &str, message: &str) {
        self.failures
            .write()
            .expect("MockQueryExecutor: failures lock poisoned")
            .insert(field_key.to_string(), message.to_string());
    }

    /// All queries executed so far, in dispatch order.
    pub fn executed(&self) -> Vec<ResponseQuery> {
        self.executed
            .lock()
            .expect("MockQueryExecutor: executed lock poisoned")
            .clone()
    }

    fn primary_key(shape: &QueryShape) -> &str {
        let field = match shape {
            QueryShape::GroupCount { field }
            | QueryShape::GroupCountByIteration { field }
            | QueryShape::GroupCountFlattened { field }
            | QueryShape::SampleRows { field, .. } => field,
        };
        field.keys.first().map(String::as_str).unwrap_or_default()
    }
}

#[async_trait]
impl QueryExecutor for MockQueryExecutor {
    async fn execute(&self, query: &ResponseQuery) -> Result<Vec<QueryRow>, QueryError> {
        self.executed
            .lock()
            .expect("MockQueryExecutor: executed lock poisoned")
            .push(query.clone());

        let key = Self::primary_key(&query.shape);
        if let Some(message) = self
            .failures
            .read()
            .expect("MockQueryExecutor: failures lock poisoned")
            .get(key)
        {
            return Err(QueryError::Execution(message.clone()));
        }
        let rows = self
            .responses
            .read()
            .expect("MockQueryExecutor: responses lock poisoned")
            .get(key)
            .cloned()
            .unwrap_or_default();

        // Sample queries exclude blank responses and cap the row count,
        // like a real query engine applying the shape's filter.
        if let QueryShape::SampleRows { limit, .. } = &query.shape {
            return Ok(rows
                .into_iter()
                .filter(|row| {
                    row.get(1)
                        .and_then(|value| value.as_str())
                        .is_some_and(|text| !text.trim().is_empty())
                })
                .take(*limit)
                .collect());
        }
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::SurveyId;
    use crate::ports::{CoalesceField, DateWindow, SURVEY_SENT_EVENT};
    use chrono::Utc;
    use serde_json::json;

    fn group_count_query(key: &str) -> ResponseQuery {
        ResponseQuery {
            survey_id: SurveyId::new(),
            event: SURVEY_SENT_EVENT.to_string(),
            window: DateWindow {
                start: Utc::now(),
                end: Utc::now(),
            },
            iteration: None,
            filters: vec![],
            shape: QueryShape::GroupCount {
                field: CoalesceField {
                    keys: vec![key.to_string()],
                },
            },
        }
    }

    #[tokio::test]
    async fn scripted_rows_are_returned_by_field_key() {
        let executor = MockQueryExecutor::new();
        executor.script("response", vec![vec![json!(10), json!(3)]]);

        let rows = executor.execute(&group_count_query("response")).await.unwrap();
        assert_eq!(rows, vec![vec![json!(10), json!(3)]]);
        assert_eq!(executor.executed().len(), 1);
    }

    #[tokio::test]
    async fn unscripted_fields_return_no_rows() {
        let executor = MockQueryExecutor::new();
        let rows = executor.execute(&group_count_query("response_3")).await.unwrap();
        assert!(rows.is_empty());
    }

    fn sample_rows_query(key: &str, limit: usize) -> ResponseQuery {
        ResponseQuery {
            shape: QueryShape::SampleRows {
                field: CoalesceField {
                    keys: vec![key.to_string()],
                },
                limit,
            },
            ..group_count_query(key)
        }
    }

    #[tokio::test]
    async fn sample_queries_drop_blank_responses() {
        let executor = MockQueryExecutor::new();
        executor.script(
            "response",
            vec![
                vec![json!("user-1"), json!("Loved it"), json!({}), json!({})],
                vec![json!("user-2"), json!(""), json!({}), json!({})],
                vec![json!("user-3"), json!("   \t"), json!({}), json!({})],
            ],
        );

        let rows = executor
            .execute(&sample_rows_query("response", 20))
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0][0], json!("user-1"));
    }

    #[tokio::test]
    async fn sample_queries_respect_the_row_cap() {
        let executor = MockQueryExecutor::new();
        executor.script(
            "response",
            (0..5)
                .map(|i| {
                    vec![
                        json!(format!("user-{i}")),
                        json!("fine"),
                        json!({}),
                        json!({}),
                    ]
                })
                .collect(),
        );

        let rows = executor
            .execute(&sample_rows_query("response", 2))
            .await
            .unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[tokio::test]
    async fn scripted_failures_surface_as_execution_errors() {
        let executor = MockQueryExecutor::new();
        executor.fail("response", "timeout");
        let result = executor.execute(&group_count_query("response")).await;
        assert!(matches!(result, Err(QueryError::Execution(message)) if message == "timeout"));
    }
}
