//! Error types for the domain layer.

use thiserror::Error;

/// Errors that occur during value object construction.
#[derive(Debug, Clone, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' must be between {min} and {max}, got {actual}")]
    OutOfRange {
        field: String,
        min: i64,
        max: i64,
        actual: i64,
    },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField {
            field: field.into(),
        }
    }

    /// Creates an out of range validation error.
    pub fn out_of_range(field: impl Into<String>, min: i64, max: i64, actual: i64) -> Self {
        ValidationError::OutOfRange {
            field: field.into(),
            min,
            max,
            actual,
        }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Errors that block persisting a survey definition.
///
/// Distinct from aggregation-time errors: these reject the definition
/// itself, not the display of results.
#[derive(Debug, Clone, Error)]
pub enum SurveyValidationError {
    /// The branching rules form a cycle reachable from the first question.
    #[error("Survey branching contains a cycle starting from question {start_index}")]
    CycleDetected { start_index: usize },

    /// An explicit branching target references a question index that does
    /// not exist (e.g. the question was deleted after the rule was set).
    #[error("Question {question_index} branches to out-of-range question {target_index} (survey has {question_count} questions)")]
    TargetOutOfRange {
        question_index: usize,
        target_index: usize,
        question_count: usize,
    },

    /// Response-based branching attached to a question kind that does not
    /// support it (only rating and single-choice questions do).
    #[error("Question {question_index} of kind '{kind}' does not support response-based branching")]
    ResponseBranchingUnsupported {
        question_index: usize,
        kind: &'static str,
    },

    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_messages_name_the_field() {
        let err = ValidationError::empty_field("questions");
        assert_eq!(err.to_string(), "Field 'questions' cannot be empty");

        let err = ValidationError::out_of_range("scale", 3, 10, 12);
        assert!(err.to_string().contains("between 3 and 10"));
    }

    #[test]
    fn survey_validation_error_describes_cycle_location() {
        let err = SurveyValidationError::CycleDetected { start_index: 0 };
        assert!(err.to_string().contains("cycle"));
        assert!(err.to_string().contains("question 0"));
    }

    #[test]
    fn target_out_of_range_reports_all_indices() {
        let err = SurveyValidationError::TargetOutOfRange {
            question_index: 1,
            target_index: 7,
            question_count: 3,
        };
        let msg = err.to_string();
        assert!(msg.contains("Question 1"));
        assert!(msg.contains("question 7"));
        assert!(msg.contains("3 questions"));
    }
}
