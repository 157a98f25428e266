//! Per-question-type aggregation query construction.

use chrono::{Duration, Utc};

use crate::config::AggregationConfig;
use crate::domain::survey::{Question, QuestionKind, RatingScale, ResponseField, Survey};
use crate::ports::{
    CoalesceField, DateWindow, PropertyFilter, QueryShape, ResponseQuery, SURVEY_SENT_EVENT,
};

/// Builds [`ResponseQuery`] descriptions for a survey's questions.
///
/// All builders share the survey id, the aggregation window and, for
/// recurring surveys, an optional iteration filter. Every shape
/// references the response field through its coalesce-ordered key pair.
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    open_text_sample_limit: usize,
    end_window_padding_days: i64,
}

impl QueryBuilder {
    pub fn new(config: &AggregationConfig) -> Self {
        Self {
            open_text_sample_limit: config.open_text_sample_limit,
            end_window_padding_days: config.end_window_padding_days,
        }
    }

    /// The aggregation window: survey start (else creation) through
    /// survey end (else now plus padding, so same-day data is included).
    pub fn window(&self, survey: &Survey) -> DateWindow {
        DateWindow {
            start: survey.start_date.unwrap_or(survey.created_at),
            end: survey
                .end_date
                .unwrap_or_else(|| Utc::now() + Duration::days(self.end_window_padding_days)),
        }
    }

    /// The query for the question at `index`, or `None` for kinds with
    /// nothing to aggregate (links).
    ///
    /// `window_override` replaces the survey-derived window;
    /// `trend_by_iteration` selects the per-iteration NPS grouping for
    /// scale-10 ratings of recurring surveys; `iteration` narrows any
    /// query to one iteration.
    pub fn build(
        &self,
        survey: &Survey,
        index: usize,
        window_override: Option<DateWindow>,
        iteration: Option<u32>,
        trend_by_iteration: bool,
        filters: Vec<PropertyFilter>,
    ) -> Option<ResponseQuery> {
        let question = survey.question(index)?;
        let field = CoalesceField::from(&self.response_field(question, index));

        let shape = match &question.kind {
            QuestionKind::Link { .. } => return None,
            QuestionKind::Rating { scale, .. } => {
                if trend_by_iteration && *scale == RatingScale::Ten && survey.is_recurring() {
                    QueryShape::GroupCountByIteration { field }
                } else {
                    QueryShape::GroupCount { field }
                }
            }
            QuestionKind::SingleChoice { .. } => QueryShape::GroupCount { field },
            // Each event's response is an array of picked choices; it has
            // to be exploded so one event can count toward several buckets.
            QuestionKind::MultipleChoice { .. } => QueryShape::GroupCountFlattened { field },
            QuestionKind::Open => QueryShape::SampleRows {
                field,
                limit: self.open_text_sample_limit,
            },
        };

        Some(ResponseQuery {
            survey_id: survey.id,
            event: SURVEY_SENT_EVENT.to_string(),
            window: window_override.unwrap_or_else(|| self.window(survey)),
            iteration,
            filters,
            shape,
        })
    }

    fn response_field(&self, question: &Question, index: usize) -> ResponseField {
        ResponseField::resolve(index, question.id)
    }
}
