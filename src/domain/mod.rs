//! Domain layer - pure survey model, branching graph and result types.
//!
//! Nothing in this layer performs I/O; all entities are read-mostly
//! snapshots and transformations produce new values.

pub mod foundation;
pub mod results;
pub mod survey;
