//! Open-text response samples.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// One sampled open-text response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenTextEntry {
    pub distinct_id: String,
    pub response: String,
    /// Raw event properties, passed through for the presentation layer.
    pub properties: HashMap<String, Value>,
    /// Person properties, passed through likewise.
    pub person_properties: HashMap<String, Value>,
}

/// A bounded sample of open-text responses.
///
/// Open-text results are displayed as example cards, not complete
/// datasets, so this is a deliberate sampling bound rather than a scan.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OpenTextSample {
    pub entries: Vec<OpenTextEntry>,
}

impl OpenTextSample {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
