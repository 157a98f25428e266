//! Turns raw query rows into typed per-question statistics.
//!
//! Row layout is positional per [`QueryShape`]; this module is the other
//! half of that contract. Malformed rows surface as
//! [`QueryError::MalformedRow`] and are recovered per question by the
//! orchestrator, never propagated across questions.

use serde_json::Value;
use std::collections::BTreeMap;
use std::collections::HashMap;

use crate::domain::results::{
    ChoiceBreakdown, NpsBreakdown, NpsScore, NpsTrend, NpsTrendPoint, OpenTextEntry,
    OpenTextSample, QuestionStats,
};
use crate::domain::results::RatingDistribution;
use crate::domain::survey::{QuestionKind, RatingScale};
use crate::ports::{QueryError, QueryRow, QueryShape};

/// Interprets `rows` for the given question and query shape.
pub fn process(
    kind: &QuestionKind,
    shape: &QueryShape,
    rows: Vec<QueryRow>,
) -> Result<QuestionStats, QueryError> {
    match (kind, shape) {
        (QuestionKind::Rating { scale, .. }, QueryShape::GroupCount { .. }) => {
            let distribution = rating_distribution(*scale, rows)?;
            let nps = NpsScore::from_distribution(&distribution);
            Ok(QuestionStats::Rating { distribution, nps })
        }
        (QuestionKind::Rating { .. }, QueryShape::GroupCountByIteration { .. }) => {
            Ok(QuestionStats::RecurringNps {
                trend: nps_trend(rows)?,
            })
        }
        (QuestionKind::SingleChoice { .. }, QueryShape::GroupCount { .. }) => {
            Ok(QuestionStats::SingleChoice {
                breakdown: single_choice_breakdown(rows)?,
            })
        }
        (
            QuestionKind::MultipleChoice {
                choices,
                has_open_choice,
            },
            QueryShape::GroupCountFlattened { .. },
        ) => Ok(QuestionStats::MultipleChoice {
            breakdown: multiple_choice_breakdown(choices, *has_open_choice, rows)?,
        }),
        (QuestionKind::Open, QueryShape::SampleRows { .. }) => Ok(QuestionStats::OpenText {
            sample: open_text_sample(rows)?,
        }),
        (kind, shape) => Err(QueryError::MalformedRow {
            row: 0,
            reason: format!(
                "shape {shape:?} does not match question kind '{}'",
                kind.name()
            ),
        }),
    }
}

/// `[value, count]` rows into a fixed-size bucket array.
pub fn rating_distribution(
    scale: RatingScale,
    rows: Vec<QueryRow>,
) -> Result<RatingDistribution, QueryError> {
    let mut distribution = RatingDistribution::empty(scale);
    for (index, row) in rows.into_iter().enumerate() {
        let value = scalar_i64(&row, 0, index)?;
        let count = scalar_u64(&row, 1, index)?;
        if !distribution.record(value, count) {
            return Err(QueryError::MalformedRow {
                row: index,
                reason: format!("rating value {value} outside scale {}", scale.size()),
            });
        }
    }
    Ok(distribution)
}

/// `[iteration, value, count]` rows into a per-iteration NPS series.
pub fn nps_trend(rows: Vec<QueryRow>) -> Result<NpsTrend, QueryError> {
    let mut by_iteration: BTreeMap<u32, NpsBreakdown> = BTreeMap::new();
    for (index, row) in rows.into_iter().enumerate() {
        let raw_iteration = scalar_u64(&row, 0, index)?;
        let iteration = u32::try_from(raw_iteration).map_err(|_| QueryError::MalformedRow {
            row: index,
            reason: format!("iteration {raw_iteration} exceeds the supported range"),
        })?;
        let value = scalar_i64(&row, 1, index)?;
        let count = scalar_u64(&row, 2, index)?;
        if iteration == 0 {
            return Err(QueryError::MalformedRow {
                row: index,
                reason: "iteration numbers are 1-based".to_string(),
            });
        }
        by_iteration.entry(iteration).or_default().record(value, count);
    }
    Ok(NpsTrend {
        points: by_iteration
            .into_iter()
            .map(|(iteration, breakdown)| NpsTrendPoint {
                iteration,
                score: breakdown.score(),
                total: breakdown.total(),
            })
            .collect(),
    })
}

/// `[value, count]` rows into a breakdown over the returned values only.
pub fn single_choice_breakdown(rows: Vec<QueryRow>) -> Result<ChoiceBreakdown, QueryError> {
    let mut counts = Vec::with_capacity(rows.len());
    for (index, row) in rows.into_iter().enumerate() {
        counts.push((scalar_string(&row, 0, index)?, scalar_u64(&row, 1, index)?));
    }
    Ok(ChoiceBreakdown::from_counts(counts))
}

/// `[value, count]` rows (post-flatten) into a breakdown over the
/// declared choices, zero-filling unobserved options.
///
/// A trailing open choice is never zero-filled: it stands for arbitrary
/// text, so a synthetic zero row would be meaningless. Observed values
/// outside the declared list (open-choice text) are appended after the
/// declared options.
pub fn multiple_choice_breakdown(
    declared: &[String],
    has_open_choice: bool,
    rows: Vec<QueryRow>,
) -> Result<ChoiceBreakdown, QueryError> {
    let mut observed: Vec<(String, u64)> = Vec::with_capacity(rows.len());
    for (index, row) in rows.into_iter().enumerate() {
        observed.push((scalar_string(&row, 0, index)?, scalar_u64(&row, 1, index)?));
    }

    let fixed_options = if has_open_choice && !declared.is_empty() {
        &declared[..declared.len() - 1]
    } else {
        declared
    };

    let mut counts: Vec<(String, u64)> = Vec::new();
    for option in declared {
        let synthesize = fixed_options.iter().any(|fixed| fixed == option);
        match observed.iter().find(|(label, _)| label == option) {
            Some((label, count)) => counts.push((label.clone(), *count)),
            None if synthesize => counts.push((option.clone(), 0)),
            None => {}
        }
    }
    for (label, count) in observed {
        if !counts.iter().any(|(existing, _)| *existing == label) {
            counts.push((label, count));
        }
    }
    Ok(ChoiceBreakdown::from_counts(counts))
}

/// `[distinct_id, response, properties, person_properties]` rows into a
/// bounded sample.
pub fn open_text_sample(rows: Vec<QueryRow>) -> Result<OpenTextSample, QueryError> {
    let mut entries = Vec::with_capacity(rows.len());
    for (index, row) in rows.into_iter().enumerate() {
        entries.push(OpenTextEntry {
            distinct_id: scalar_string(&row, 0, index)?,
            response: scalar_string(&row, 1, index)?,
            properties: object(&row, 2, index)?,
            person_properties: object(&row, 3, index)?,
        });
    }
    Ok(OpenTextSample { entries })
}

fn column<'a>(row: &'a QueryRow, column: usize, index: usize) -> Result<&'a Value, QueryError> {
    row.get(column).ok_or_else(|| QueryError::MalformedRow {
        row: index,
        reason: format!("missing column {column}"),
    })
}

fn scalar_i64(row: &QueryRow, col: usize, index: usize) -> Result<i64, QueryError> {
    let value = column(row, col, index)?;
    value
        .as_i64()
        .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()))
        .ok_or_else(|| QueryError::MalformedRow {
            row: index,
            reason: format!("column {col} is not an integer: {value}"),
        })
}

fn scalar_u64(row: &QueryRow, col: usize, index: usize) -> Result<u64, QueryError> {
    let value = column(row, col, index)?;
    value
        .as_u64()
        .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()))
        .ok_or_else(|| QueryError::MalformedRow {
            row: index,
            reason: format!("column {col} is not a count: {value}"),
        })
}

fn scalar_string(row: &QueryRow, col: usize, index: usize) -> Result<String, QueryError> {
    let value = column(row, col, index)?;
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| QueryError::MalformedRow {
            row: index,
            reason: format!("column {col} is not a string: {value}"),
        })
}

fn object(
    row: &QueryRow,
    col: usize,
    index: usize,
) -> Result<HashMap<String, Value>, QueryError> {
    match column(row, col, index)? {
        Value::Object(map) => Ok(map.clone().into_iter().collect()),
        Value::Null => Ok(HashMap::new()),
        other => Err(QueryError::MalformedRow {
            row: index,
            reason: format!("column {col} is not an object: {other}"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rows(raw: &[&[Value]]) -> Vec<QueryRow> {
        raw.iter().map(|row| row.to_vec()).collect()
    }

    #[test]
    fn rating_rows_fill_the_bucket_array() {
        let dist = rating_distribution(
            RatingScale::Ten,
            rows(&[
                &[json!(0), json!(2)],
                &[json!(9), json!(5)],
                &[json!(10), json!(1)],
            ]),
        )
        .unwrap();
        assert_eq!(dist.buckets[0], 2);
        assert_eq!(dist.buckets[9], 5);
        assert_eq!(dist.buckets[10], 1);
        assert_eq!(dist.total, 8);
    }

    #[test]
    fn one_based_scales_shift_values_down() {
        let dist =
            rating_distribution(RatingScale::Five, rows(&[&[json!(1), json!(3)]])).unwrap();
        assert_eq!(dist.buckets[0], 3);
    }

    #[test]
    fn numeric_strings_are_tolerated() {
        let dist =
            rating_distribution(RatingScale::Ten, rows(&[&[json!("7"), json!("4")]])).unwrap();
        assert_eq!(dist.buckets[7], 4);
    }

    #[test]
    fn out_of_scale_value_is_a_malformed_row() {
        let result = rating_distribution(RatingScale::Five, rows(&[&[json!(6), json!(1)]]));
        assert!(matches!(result, Err(QueryError::MalformedRow { row: 0, .. })));
    }

    #[test]
    fn trend_accumulates_per_iteration() {
        let trend = nps_trend(rows(&[
            &[json!(1), json!(10), json!(6)],
            &[json!(1), json!(0), json!(2)],
            &[json!(2), json!(8), json!(4)],
            &[json!(2), json!(9), json!(4)],
        ]))
        .unwrap();
        assert_eq!(trend.points.len(), 2);
        assert_eq!(trend.points[0].iteration, 1);
        // (6 - 2) / 8 * 100 = 50.0
        assert_eq!(trend.points[0].score, NpsScore::Score(50.0));
        assert_eq!(trend.points[1].iteration, 2);
        // (4 - 0) / 8 * 100 = 50.0
        assert_eq!(trend.points[1].score, NpsScore::Score(50.0));
    }

    #[test]
    fn trend_rejects_zero_iteration() {
        let result = nps_trend(rows(&[&[json!(0), json!(5), json!(1)]]));
        assert!(matches!(result, Err(QueryError::MalformedRow { .. })));
    }

    #[test]
    fn trend_rejects_iterations_beyond_u32_instead_of_wrapping() {
        // 2^32 + 1 would silently become iteration 1 under a plain cast.
        let result = nps_trend(rows(&[&[json!(4_294_967_297u64), json!(5), json!(1)]]));
        assert!(matches!(result, Err(QueryError::MalformedRow { row: 0, .. })));
    }

    #[test]
    fn single_choice_uses_returned_values_only() {
        let breakdown = single_choice_breakdown(rows(&[
            &[json!("Yes"), json!(7)],
            &[json!("No"), json!(3)],
        ]))
        .unwrap();
        assert_eq!(breakdown.total, 10);
        assert_eq!(breakdown.entries.len(), 2);
        assert!((breakdown.entries[0].fraction - 0.7).abs() < f64::EPSILON);
    }

    #[test]
    fn multiple_choice_zero_fills_unobserved_declared_options() {
        let declared = vec!["A".to_string(), "B".to_string(), "C".to_string()];
        let breakdown =
            multiple_choice_breakdown(&declared, false, rows(&[&[json!("B"), json!(4)]]))
                .unwrap();
        assert_eq!(breakdown.count_for("A"), Some(0));
        assert_eq!(breakdown.count_for("B"), Some(4));
        assert_eq!(breakdown.count_for("C"), Some(0));
    }

    #[test]
    fn trailing_open_choice_is_never_synthesized() {
        let declared = vec!["A".to_string(), "B".to_string(), "Other".to_string()];
        let breakdown =
            multiple_choice_breakdown(&declared, true, rows(&[&[json!("A"), json!(2)]]))
                .unwrap();
        assert_eq!(breakdown.count_for("A"), Some(2));
        assert_eq!(breakdown.count_for("B"), Some(0));
        assert_eq!(breakdown.count_for("Other"), None);
    }

    #[test]
    fn observed_open_choice_text_is_kept() {
        let declared = vec!["A".to_string(), "Other".to_string()];
        let breakdown = multiple_choice_breakdown(
            &declared,
            true,
            rows(&[
                &[json!("A"), json!(2)],
                &[json!("love the dashboards"), json!(1)],
            ]),
        )
        .unwrap();
        assert_eq!(breakdown.count_for("A"), Some(2));
        assert_eq!(breakdown.count_for("love the dashboards"), Some(1));
        assert_eq!(breakdown.total, 3);
    }

    #[test]
    fn open_text_rows_pass_through() {
        let sample = open_text_sample(rows(&[&[
            json!("user-1"),
            json!("Loved it"),
            json!({"browser": "firefox"}),
            json!({"plan": "scale"}),
        ]]))
        .unwrap();
        assert_eq!(sample.len(), 1);
        assert_eq!(sample.entries[0].distinct_id, "user-1");
        assert_eq!(sample.entries[0].response, "Loved it");
        assert_eq!(
            sample.entries[0].properties.get("browser"),
            Some(&json!("firefox"))
        );
    }

    #[test]
    fn open_text_tolerates_null_property_columns() {
        let sample = open_text_sample(rows(&[&[
            json!("user-2"),
            json!("ok"),
            Value::Null,
            Value::Null,
        ]]))
        .unwrap();
        assert!(sample.entries[0].properties.is_empty());
    }

    #[test]
    fn mismatched_shape_is_rejected() {
        let kind = QuestionKind::Open;
        let shape = QueryShape::GroupCount {
            field: crate::ports::CoalesceField {
                keys: vec!["response".to_string()],
            },
        };
        assert!(process(&kind, &shape, vec![]).is_err());
    }
}
