//! Survey definition store port.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::foundation::SurveyId;
use crate::domain::survey::Survey;

/// Errors from the survey definition store.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("Survey not found: {0}")]
    NotFound(SurveyId),

    #[error("Store backend error: {0}")]
    Backend(String),
}

/// Read-only access to persisted survey definitions.
#[async_trait]
pub trait SurveyStore: Send + Sync {
    async fn get(&self, id: SurveyId) -> Result<Survey, StoreError>;
}
