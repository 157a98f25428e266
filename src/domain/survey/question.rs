//! Question variants and rating scales.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{QuestionId, ValidationError};

use super::Branching;

/// Rating scale sizes supported by rating questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RatingScale {
    Three,
    Five,
    Seven,
    Ten,
}

impl RatingScale {
    /// Creates a scale from its size, rejecting unsupported values.
    pub fn try_from_u8(value: u8) -> Result<Self, ValidationError> {
        match value {
            3 => Ok(RatingScale::Three),
            5 => Ok(RatingScale::Five),
            7 => Ok(RatingScale::Seven),
            10 => Ok(RatingScale::Ten),
            other => Err(ValidationError::invalid_format(
                "scale",
                format!("supported scales are 3, 5, 7 and 10, got {other}"),
            )),
        }
    }

    /// The scale size.
    pub fn size(&self) -> u8 {
        match self {
            RatingScale::Three => 3,
            RatingScale::Five => 5,
            RatingScale::Seven => 7,
            RatingScale::Ten => 10,
        }
    }

    /// Number of distribution buckets for this scale.
    ///
    /// Scale 10 is 0-based (NPS convention, values 0-10) and needs 11
    /// buckets; every other scale is 1-based with one bucket per value.
    pub fn bucket_count(&self) -> usize {
        match self {
            RatingScale::Ten => 11,
            other => other.size() as usize,
        }
    }

    /// Maps a response value onto its bucket index, or `None` when the
    /// value is outside the scale.
    pub fn bucket_index(&self, value: i64) -> Option<usize> {
        match self {
            RatingScale::Ten => (0..=10).contains(&value).then(|| value as usize),
            other => {
                let size = i64::from(other.size());
                (1..=size).contains(&value).then(|| (value - 1) as usize)
            }
        }
    }
}

/// The closed set of question kinds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QuestionKind {
    /// Free-text response.
    Open,
    /// Numeric rating on a fixed scale with labelled bounds.
    Rating {
        scale: RatingScale,
        lower_label: String,
        upper_label: String,
    },
    /// Pick exactly one of the declared choices.
    SingleChoice {
        choices: Vec<String>,
        /// Last choice accepts free text instead of being a fixed option.
        has_open_choice: bool,
    },
    /// Pick any number of the declared choices.
    MultipleChoice {
        choices: Vec<String>,
        has_open_choice: bool,
    },
    /// A link presented to the respondent; captures no response value.
    Link { url: String },
}

impl QuestionKind {
    /// Short name used in labels and error messages.
    pub fn name(&self) -> &'static str {
        match self {
            QuestionKind::Open => "open",
            QuestionKind::Rating { .. } => "rating",
            QuestionKind::SingleChoice { .. } => "single_choice",
            QuestionKind::MultipleChoice { .. } => "multiple_choice",
            QuestionKind::Link { .. } => "link",
        }
    }

    /// Response-based branching is only legal where a response maps onto a
    /// small closed value set: ratings and single-choice answers.
    pub fn supports_response_branching(&self) -> bool {
        matches!(
            self,
            QuestionKind::Rating { .. } | QuestionKind::SingleChoice { .. }
        )
    }

    /// Declared choice labels, for the choice kinds.
    pub fn choices(&self) -> Option<&[String]> {
        match self {
            QuestionKind::SingleChoice { choices, .. }
            | QuestionKind::MultipleChoice { choices, .. } => Some(choices),
            _ => None,
        }
    }
}

/// A single survey question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// Stable id; absent on legacy surveys, which address questions by
    /// positional index only.
    pub id: Option<QuestionId>,
    pub text: String,
    pub kind: QuestionKind,
    /// Explicit navigation rule; absent means positional fall-through.
    pub branching: Option<Branching>,
}

impl Question {
    pub fn new(id: Option<QuestionId>, text: impl Into<String>, kind: QuestionKind) -> Self {
        Self {
            id,
            text: text.into(),
            kind,
            branching: None,
        }
    }

    /// Attaches a branching rule.
    pub fn with_branching(mut self, branching: Branching) -> Self {
        self.branching = Some(branching);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_try_from_accepts_supported_sizes() {
        assert_eq!(RatingScale::try_from_u8(3).unwrap(), RatingScale::Three);
        assert_eq!(RatingScale::try_from_u8(5).unwrap(), RatingScale::Five);
        assert_eq!(RatingScale::try_from_u8(7).unwrap(), RatingScale::Seven);
        assert_eq!(RatingScale::try_from_u8(10).unwrap(), RatingScale::Ten);
    }

    #[test]
    fn scale_try_from_rejects_other_sizes() {
        assert!(RatingScale::try_from_u8(0).is_err());
        assert!(RatingScale::try_from_u8(4).is_err());
        assert!(RatingScale::try_from_u8(11).is_err());
    }

    #[test]
    fn scale_ten_has_eleven_buckets() {
        assert_eq!(RatingScale::Ten.bucket_count(), 11);
        assert_eq!(RatingScale::Five.bucket_count(), 5);
        assert_eq!(RatingScale::Three.bucket_count(), 3);
    }

    #[test]
    fn scale_ten_buckets_are_zero_based() {
        assert_eq!(RatingScale::Ten.bucket_index(0), Some(0));
        assert_eq!(RatingScale::Ten.bucket_index(10), Some(10));
        assert_eq!(RatingScale::Ten.bucket_index(11), None);
        assert_eq!(RatingScale::Ten.bucket_index(-1), None);
    }

    #[test]
    fn smaller_scales_are_one_based() {
        assert_eq!(RatingScale::Five.bucket_index(1), Some(0));
        assert_eq!(RatingScale::Five.bucket_index(5), Some(4));
        assert_eq!(RatingScale::Five.bucket_index(0), None);
        assert_eq!(RatingScale::Five.bucket_index(6), None);
    }

    #[test]
    fn response_branching_only_on_rating_and_single_choice() {
        let rating = QuestionKind::Rating {
            scale: RatingScale::Ten,
            lower_label: String::new(),
            upper_label: String::new(),
        };
        let single = QuestionKind::SingleChoice {
            choices: vec!["Yes".into(), "No".into()],
            has_open_choice: false,
        };
        let multiple = QuestionKind::MultipleChoice {
            choices: vec!["A".into()],
            has_open_choice: false,
        };
        assert!(rating.supports_response_branching());
        assert!(single.supports_response_branching());
        assert!(!multiple.supports_response_branching());
        assert!(!QuestionKind::Open.supports_response_branching());
        assert!(!QuestionKind::Link {
            url: "https://example.com".into()
        }
        .supports_response_branching());
    }
}
