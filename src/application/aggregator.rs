//! Concurrent per-question aggregation orchestrator.
//!
//! Each question's aggregation is an independent unit of work with no
//! shared mutable state, so all queries are dispatched concurrently. The
//! only shared resource is the results cache, keyed by question index,
//! with a generation token per entry: when the parameters change the
//! generation is bumped and late inserts from the previous run are
//! dropped instead of physically cancelling in-flight queries.

use futures::future::join_all;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::AggregationConfig;
use crate::domain::foundation::SurveyId;
use crate::domain::results::QuestionStats;
use crate::domain::survey::{ResponseField, Survey};
use crate::ports::{
    CoalesceField, DateWindow, FilterOperator, PropertyFilter, QueryExecutor, StoreError,
    SurveyStore,
};

use super::postprocess;
use super::query_builder::QueryBuilder;

/// A per-question answer predicate narrowing the whole aggregation run.
#[derive(Debug, Clone, PartialEq)]
pub struct AnswerFilter {
    /// Index of the question whose response the predicate inspects.
    pub question_index: usize,
    pub operator: FilterOperator,
    pub values: Vec<Value>,
}

/// Parameters of one aggregation run. Any change invalidates cached
/// results.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregationParams {
    pub survey_id: SurveyId,
    /// Replace the survey-derived date window. Participates in the
    /// parameter equality check, so a window change invalidates cached
    /// results like any other parameter change.
    pub window_override: Option<DateWindow>,
    /// Narrow all queries to one iteration of a recurring survey.
    pub iteration: Option<u32>,
    /// Ask for per-iteration NPS trends on scale-10 rating questions of
    /// recurring surveys.
    pub nps_trend_by_iteration: bool,
    pub answer_filters: Vec<AnswerFilter>,
}

impl AggregationParams {
    pub fn new(survey_id: SurveyId) -> Self {
        Self {
            survey_id,
            window_override: None,
            iteration: None,
            nps_trend_by_iteration: false,
            answer_filters: Vec::new(),
        }
    }
}

/// Errors that abort an entire aggregation run (per-question failures do
/// not; they only leave that question's entry absent).
#[derive(Debug, Error)]
pub enum AggregationError {
    #[error(transparent)]
    Store(#[from] StoreError),
}

struct CachedStats {
    generation: u64,
    stats: QuestionStats,
}

/// Fans out one query per question and joins the statistics into a
/// results map supporting partial, incremental consumption.
pub struct SurveyAnalytics {
    store: Arc<dyn SurveyStore>,
    executor: Arc<dyn QueryExecutor>,
    builder: QueryBuilder,
    generation: AtomicU64,
    last_params: RwLock<Option<AggregationParams>>,
    cache: RwLock<HashMap<usize, CachedStats>>,
}

impl SurveyAnalytics {
    pub fn new(
        store: Arc<dyn SurveyStore>,
        executor: Arc<dyn QueryExecutor>,
        config: &AggregationConfig,
    ) -> Self {
        Self {
            store,
            executor,
            builder: QueryBuilder::new(config),
            generation: AtomicU64::new(0),
            last_params: RwLock::new(None),
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Runs aggregation for every question of the survey concurrently.
    ///
    /// A failed or empty result for one question never aborts the others:
    /// the failure is logged and that question's entry stays absent,
    /// which consumers read as "not yet ready" rather than "zero
    /// responses".
    pub async fn aggregate(&self, params: AggregationParams) -> Result<(), AggregationError> {
        let survey_id = params.survey_id;
        let window = params.window_override;
        let iteration = params.iteration;
        let trend = params.nps_trend_by_iteration;
        let generation = self.begin_generation(params.clone());
        let survey = self.store.get(survey_id).await?;
        let filters = self.resolve_filters(&survey, &params.answer_filters);

        let work = (0..survey.question_count()).filter_map(|index| {
            let query = self
                .builder
                .build(&survey, index, window, iteration, trend, filters.clone())?;
            let kind = survey.question(index)?.kind.clone();
            Some(async move {
                debug!(question = index, survey = %survey_id, "dispatching response query");
                match self.executor.execute(&query).await {
                    Ok(rows) => match postprocess::process(&kind, &query.shape, rows) {
                        Ok(stats) => self.insert(index, generation, stats),
                        Err(err) => {
                            warn!(question = index, error = %err, "discarding malformed result");
                        }
                    },
                    Err(err) => {
                        warn!(question = index, error = %err, "question query failed");
                    }
                }
            })
        });
        join_all(work).await;
        Ok(())
    }

    /// Snapshot of the current-generation results keyed by question
    /// index. Entries appear as their queries complete.
    pub fn results(&self) -> HashMap<usize, QuestionStats> {
        let generation = self.generation.load(Ordering::Acquire);
        self.cache
            .read()
            .expect("SurveyAnalytics: cache lock poisoned")
            .iter()
            .filter(|(_, cached)| cached.generation == generation)
            .map(|(&index, cached)| (index, cached.stats.clone()))
            .collect()
    }

    /// Bumps the generation when the parameters changed, invalidating all
    /// cached entries and any still-running queries of the previous run.
    fn begin_generation(&self, params: AggregationParams) -> u64 {
        let mut last = self
            .last_params
            .write()
            .expect("SurveyAnalytics: params lock poisoned");
        let changed = last.as_ref() != Some(&params);
        *last = Some(params);
        if changed {
            let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
            self.cache
                .write()
                .expect("SurveyAnalytics: cache lock poisoned")
                .retain(|_, cached| cached.generation == generation);
            generation
        } else {
            self.generation.load(Ordering::Acquire)
        }
    }

    fn insert(&self, index: usize, generation: u64, stats: QuestionStats) {
        if self.generation.load(Ordering::Acquire) != generation {
            debug!(question = index, "dropping stale result");
            return;
        }
        self.cache
            .write()
            .expect("SurveyAnalytics: cache lock poisoned")
            .insert(index, CachedStats { generation, stats });
    }

    /// Resolves answer filters against their questions' response fields,
    /// keeping the stable-key-first coalesce order.
    fn resolve_filters(&self, survey: &Survey, filters: &[AnswerFilter]) -> Vec<PropertyFilter> {
        filters
            .iter()
            .filter_map(|filter| {
                let question = survey.question(filter.question_index)?;
                let field = ResponseField::resolve(filter.question_index, question.id);
                Some(PropertyFilter {
                    field: CoalesceField::from(&field),
                    operator: filter.operator,
                    values: filter.values.clone(),
                })
            })
            .collect()
    }
}
