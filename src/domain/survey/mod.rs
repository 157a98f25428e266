//! Survey definition model: ordered questions and their branching rules.

mod branching;
mod fields;
mod graph;
mod question;

pub use branching::{BranchTarget, Branching, NextStep};
pub use fields::ResponseField;
pub use graph::{has_cycle, validate_for_persistence};
pub use question::{Question, QuestionKind, RatingScale};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{SurveyId, ValidationError};

/// A survey definition: an ordered, non-empty sequence of questions.
///
/// Question order defines the default (implicit) navigation; explicit
/// [`Branching`] rules override it per question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Survey {
    pub id: SurveyId,
    pub created_at: DateTime<Utc>,
    /// When the survey was launched; falls back to `created_at` for the
    /// aggregation window.
    pub start_date: Option<DateTime<Utc>>,
    /// When the survey was stopped; open-ended while running.
    pub end_date: Option<DateTime<Utc>>,
    /// Number of scheduled repetitions for recurring surveys.
    pub iteration_count: Option<u32>,
    /// Days between repetitions for recurring surveys.
    pub iteration_frequency_days: Option<u32>,
    questions: Vec<Question>,
}

impl Survey {
    /// Creates a survey, rejecting an empty question list.
    pub fn new(
        id: SurveyId,
        created_at: DateTime<Utc>,
        questions: Vec<Question>,
    ) -> Result<Self, ValidationError> {
        if questions.is_empty() {
            return Err(ValidationError::empty_field("questions"));
        }
        Ok(Self {
            id,
            created_at,
            start_date: None,
            end_date: None,
            iteration_count: None,
            iteration_frequency_days: None,
            questions,
        })
    }

    /// Marks the survey as recurring.
    pub fn with_iterations(mut self, count: u32, frequency_days: u32) -> Self {
        self.iteration_count = Some(count);
        self.iteration_frequency_days = Some(frequency_days);
        self
    }

    /// Sets the launch timestamp.
    pub fn with_start_date(mut self, start: DateTime<Utc>) -> Self {
        self.start_date = Some(start);
        self
    }

    /// Sets the stop timestamp.
    pub fn with_end_date(mut self, end: DateTime<Utc>) -> Self {
        self.end_date = Some(end);
        self
    }

    /// The ordered questions.
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Bounds-checked question lookup.
    pub fn question(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    /// Number of questions.
    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    /// True when a survey repeats on a schedule.
    pub fn is_recurring(&self) -> bool {
        self.iteration_count.is_some()
    }

    /// The canonical next-step of the question at `index`, resolving the
    /// positional default when no explicit branching is set: the last
    /// question ends the survey, any other falls through to its successor.
    pub fn next_step(&self, index: usize) -> Option<NextStep> {
        let question = self.question(index)?;
        let is_last = index + 1 == self.questions.len();
        Some(match &question.branching {
            Some(Branching::End) => NextStep::End,
            Some(Branching::SpecificQuestion(target)) => NextStep::SpecificQuestion(*target),
            Some(Branching::ResponseBased(_)) => NextStep::ResponseBased,
            Some(Branching::NextQuestion) | None => {
                if is_last {
                    NextStep::End
                } else {
                    NextStep::NextQuestion
                }
            }
        })
    }
}
