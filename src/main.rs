//! Demo binary: wires the in-memory adapters, aggregates a sample survey
//! and prints the per-question statistics.

use std::sync::Arc;

use serde_json::json;
use tracing::info;
use tracing_subscriber::EnvFilter;

use survey_insights::adapters::query::MockQueryExecutor;
use survey_insights::adapters::store::InMemorySurveyStore;
use survey_insights::application::funnel::FunnelCalculator;
use survey_insights::application::{AggregationParams, SurveyAnalytics};
use survey_insights::config::AppConfig;
use survey_insights::domain::foundation::{QuestionId, SurveyId};
use survey_insights::domain::results::{CountSource, FunnelCounts};
use survey_insights::domain::survey::{
    validate_for_persistence, Question, QuestionKind, RatingScale, Survey,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone())),
        )
        .init();

    let nps_id = QuestionId::new();
    let nps = Question::new(
        Some(nps_id),
        "How likely are you to recommend us to a friend?",
        QuestionKind::Rating {
            scale: RatingScale::Ten,
            lower_label: "Unlikely".into(),
            upper_label: "Very likely".into(),
        },
    );
    let survey = Survey::new(
        SurveyId::new(),
        chrono::Utc::now(),
        vec![
            nps,
            Question::new(
                None,
                "Which features do you use?",
                QuestionKind::MultipleChoice {
                    choices: vec![
                        "Dashboards".into(),
                        "Alerts".into(),
                        "Exports".into(),
                        "Other".into(),
                    ],
                    has_open_choice: true,
                },
            ),
            Question::new(None, "Anything we should improve?", QuestionKind::Open),
        ],
    )?;
    validate_for_persistence(&survey)?;
    let survey_id = survey.id;

    let store = Arc::new(InMemorySurveyStore::new());
    store.put(survey);

    let executor = Arc::new(MockQueryExecutor::new());
    executor.script(
        &format!("q_{nps_id}"),
        vec![
            vec![json!(10), json!(14)],
            vec![json!(9), json!(6)],
            vec![json!(7), json!(5)],
            vec![json!(2), json!(5)],
        ],
    );
    executor.script(
        "response_1",
        vec![
            vec![json!("Dashboards"), json!(18)],
            vec![json!("Alerts"), json!(7)],
            vec![json!("keyboard shortcuts"), json!(2)],
        ],
    );
    executor.script(
        "response_2",
        vec![vec![
            json!("user-42"),
            json!("More export formats please"),
            json!({"browser": "firefox"}),
            json!({"plan": "scale"}),
        ]],
    );

    let analytics = SurveyAnalytics::new(store, executor, &config.aggregation);
    analytics.aggregate(AggregationParams::new(survey_id)).await?;

    for (index, stats) in analytics.results() {
        info!(question = index, "stats: {}", serde_json::to_string_pretty(&stats)?);
    }

    let funnel = FunnelCalculator::new(&config.aggregation).compute(
        FunnelCounts {
            shown: 250,
            dismissed: 30,
            sent: 100,
        },
        CountSource::UniquePersons,
    );
    info!(
        "funnel: sent {} of {} shown ({})",
        funnel.sent, funnel.shown, funnel.response_rate_label
    );

    Ok(())
}
