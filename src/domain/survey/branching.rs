//! Branching rules: per-question navigation directives.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Where a response-based mapping can send the respondent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BranchTarget {
    /// Terminate to the confirmation state.
    End,
    /// Jump to an explicit question index.
    SpecificQuestion { index: usize },
}

/// Navigation rule attached to a question.
///
/// `ResponseBased` is only legal on rating and single-choice questions;
/// response values absent from the map fall back to the positional
/// default (next question, or end when last).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Branching {
    /// Go to the immediately following question (the explicit spelling of
    /// the default).
    NextQuestion,
    /// Terminate to the confirmation state.
    End,
    /// Jump to an explicit question index.
    SpecificQuestion(usize),
    /// Route on the response value. Keys are the stringified response
    /// (rating value or choice index).
    ResponseBased(BTreeMap<String, BranchTarget>),
}

/// Canonical next-step of a question, with the positional default already
/// resolved. Used for graph construction and as a human-facing label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextStep {
    NextQuestion,
    End,
    SpecificQuestion(usize),
    ResponseBased,
}

impl fmt::Display for NextStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NextStep::NextQuestion => write!(f, "NextQuestion"),
            NextStep::End => write!(f, "End"),
            NextStep::SpecificQuestion(index) => write!(f, "SpecificQuestion:{index}"),
            NextStep::ResponseBased => write!(f, "ResponseBased"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_step_labels_are_canonical() {
        assert_eq!(NextStep::NextQuestion.to_string(), "NextQuestion");
        assert_eq!(NextStep::End.to_string(), "End");
        assert_eq!(NextStep::SpecificQuestion(3).to_string(), "SpecificQuestion:3");
        assert_eq!(NextStep::ResponseBased.to_string(), "ResponseBased");
    }

    #[test]
    fn response_based_serializes_with_kind_tag() {
        let mut map = BTreeMap::new();
        map.insert("9".to_string(), BranchTarget::End);
        map.insert(
            "0".to_string(),
            BranchTarget::SpecificQuestion { index: 2 },
        );
        let branching = Branching::ResponseBased(map);
        let json = serde_json::to_value(&branching).unwrap();
        assert_eq!(json["type"], "response_based");
    }
}
