//! Ports - interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `SurveyStore` - retrieves survey definitions by id
//! - `QueryExecutor` - runs structured analytical queries against the
//!   captured response events and returns tabular rows

mod query_executor;
mod survey_store;

pub use query_executor::{
    CoalesceField, DateWindow, FilterOperator, PropertyFilter, QueryError, QueryExecutor,
    QueryRow, QueryShape, ResponseQuery, SURVEY_DISMISSED_EVENT, SURVEY_SENT_EVENT,
    SURVEY_SHOWN_EVENT,
};
pub use survey_store::{StoreError, SurveyStore};
