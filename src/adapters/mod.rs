//! Adapters - implementations of the ports.
//!
//! Only in-memory/mock adapters live in this crate; production adapters
//! (a real definition store, a real query engine client) plug in behind
//! the same ports.

pub mod query;
pub mod store;
