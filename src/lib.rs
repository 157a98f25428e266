//! Survey Insights - Survey branching and response aggregation engine.
//!
//! Turns a survey definition (ordered questions with branching rules) and
//! raw captured response events into per-question statistics: rating
//! distributions, NPS scores, choice breakdowns, open-text samples and
//! funnel rates.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
