//! Shared value objects for the domain layer.

mod errors;
mod ids;

pub use errors::{SurveyValidationError, ValidationError};
pub use ids::{QuestionId, SurveyId};
