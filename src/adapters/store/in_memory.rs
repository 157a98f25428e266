//! In-memory survey store for tests and demos.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

use crate::domain::foundation::SurveyId;
use crate::domain::survey::Survey;
use crate::ports::{StoreError, SurveyStore};

/// In-memory survey definition store.
///
/// For testing and demos only; production deployments implement
/// [`SurveyStore`] against their real definition storage.
///
/// # Panics
///
/// Methods panic if the internal lock is poisoned, which is acceptable
/// for test code.
#[derive(Default)]
pub struct InMemorySurveyStore {
    surveys: RwLock<HashMap<SurveyId, Survey>>,
}

impl InMemorySurveyStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a survey definition.
    pub fn put(&self, survey: Survey) {
        self.surveys
            .write()
            .expect("InMemorySurveyStore: lock poisoned")
            .insert(survey.id, survey);
    }

    /// Number of stored surveys.
    pub fn len(&self) -> usize {
        self.surveys
            .read()
            .expect("InMemorySurveyStore: lock poisoned")
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl SurveyStore for InMemorySurveyStore {
    async fn get(&self, id: SurveyId) -> Result<Survey, StoreError> {
        self.surveys
            .read()
            .expect("InMemorySurveyStore: lock poisoned")
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }
}
