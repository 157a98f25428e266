//! Response field resolution across the two historical storage encodings.
//!
//! Older deployments keyed a question's response by position
//! (`response`, `response_1`, ...); newer deployments key it by the
//! question's stable id (`q_<id>`). A single survey's historical data may
//! be split across both, so every lookup consults both keys and prefers
//! the stable one. The coalesce order is a backward-compatibility
//! guarantee over real stored data and must not change.

use serde_json::Value;
use std::collections::HashMap;

use crate::domain::foundation::QuestionId;

/// The storage key pair for one question's response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseField {
    /// Positional key used by legacy deployments.
    pub legacy_key: String,
    /// Id-namespaced key used by current deployments; absent for legacy
    /// surveys whose questions carry no stable id.
    pub stable_key: Option<String>,
}

impl ResponseField {
    /// Resolves the key pair for the question at `index`.
    pub fn resolve(index: usize, id: Option<QuestionId>) -> Self {
        let legacy_key = if index == 0 {
            "response".to_string()
        } else {
            format!("response_{index}")
        };
        Self {
            legacy_key,
            stable_key: id.map(|id| format!("q_{id}")),
        }
    }

    /// The keys in coalesce order: stable key first, legacy fallback.
    pub fn keys(&self) -> Vec<&str> {
        match &self.stable_key {
            Some(stable) => vec![stable.as_str(), self.legacy_key.as_str()],
            None => vec![self.legacy_key.as_str()],
        }
    }

    /// Extracts this question's response from an event's properties,
    /// preferring the stable key whenever it holds a non-null value.
    pub fn coalesce<'a>(&self, properties: &'a HashMap<String, Value>) -> Option<&'a Value> {
        self.keys()
            .into_iter()
            .filter_map(|key| properties.get(key))
            .find(|value| !value.is_null())
    }
}
