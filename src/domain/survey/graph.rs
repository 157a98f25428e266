//! Branching graph construction and cycle detection.
//!
//! A survey's questions and branching rules form a directed graph over
//! question indices. A cycle means a respondent could loop forever, so
//! detecting one blocks persistence of the definition.

use super::{BranchTarget, Branching, Survey};
use crate::domain::foundation::SurveyValidationError;

/// Outgoing edges per question index.
///
/// Rules, per question `i`:
/// - `End` contributes no edges at all; it is evaluated first so a
///   (theoretically) co-present response mapping would still be walked for
///   any other rule shape.
/// - Explicit targets (`SpecificQuestion`, each mapped `ResponseBased`
///   target) each add an edge. Out-of-range targets are tolerated by not
///   adding the edge; flagging them is the caller's job, not the graph's.
/// - Every non-`End` question that is not last also falls through to
///   `i + 1`, so a question can carry multiple outgoing edges.
fn adjacency(survey: &Survey) -> Vec<Vec<usize>> {
    let count = survey.question_count();
    let mut edges = vec![Vec::new(); count];
    for (index, question) in survey.questions().iter().enumerate() {
        if matches!(question.branching, Some(Branching::End)) {
            continue;
        }
        match &question.branching {
            Some(Branching::SpecificQuestion(target)) => {
                if *target < count {
                    edges[index].push(*target);
                }
            }
            Some(Branching::ResponseBased(map)) => {
                for target in map.values() {
                    if let BranchTarget::SpecificQuestion { index: target } = target {
                        if *target < count {
                            edges[index].push(*target);
                        }
                    }
                }
            }
            Some(Branching::NextQuestion) | Some(Branching::End) | None => {}
        }
        if index + 1 < count {
            edges[index].push(index + 1);
        }
    }
    edges
}

/// Whether the branching graph contains a cycle reachable from question 0.
///
/// Traversal is depth-first from index 0 only, tracking the current path
/// rather than a global visited set: each disjoint branch is checked along
/// its own path. Questions unreachable from 0 are never examined; this is
/// a known limitation preserved for compatibility with existing surveys.
pub fn has_cycle(survey: &Survey) -> bool {
    let edges = adjacency(survey);
    if edges.is_empty() {
        return false;
    }
    let mut on_path = vec![false; edges.len()];
    walk(0, &edges, &mut on_path)
}

fn walk(node: usize, edges: &[Vec<usize>], on_path: &mut Vec<bool>) -> bool {
    if on_path[node] {
        return true;
    }
    on_path[node] = true;
    for &next in &edges[node] {
        if walk(next, edges, on_path) {
            return true;
        }
    }
    on_path[node] = false;
    false
}

/// Validates a survey definition before persistence.
///
/// Rejects cycles, out-of-range explicit targets (the graph itself
/// tolerates those, but persisting them would reference deleted
/// questions), and response-based branching on unsupported question
/// kinds. These errors block saving the definition; they are distinct
/// from aggregation-time failures.
pub fn validate_for_persistence(survey: &Survey) -> Result<(), SurveyValidationError> {
    let count = survey.question_count();
    for (index, question) in survey.questions().iter().enumerate() {
        match &question.branching {
            Some(Branching::SpecificQuestion(target)) if *target >= count => {
                return Err(SurveyValidationError::TargetOutOfRange {
                    question_index: index,
                    target_index: *target,
                    question_count: count,
                });
            }
            Some(Branching::ResponseBased(map)) => {
                if !question.kind.supports_response_branching() {
                    return Err(SurveyValidationError::ResponseBranchingUnsupported {
                        question_index: index,
                        kind: question.kind.name(),
                    });
                }
                for target in map.values() {
                    if let BranchTarget::SpecificQuestion { index: target } = target {
                        if *target >= count {
                            return Err(SurveyValidationError::TargetOutOfRange {
                                question_index: index,
                                target_index: *target,
                                question_count: count,
                            });
                        }
                    }
                }
            }
            _ => {}
        }
    }
    if has_cycle(survey) {
        return Err(SurveyValidationError::CycleDetected { start_index: 0 });
    }
    Ok(())
}
