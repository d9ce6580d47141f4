//! quizclock-core: timed answer-collection engine, question loading, and scoring.
//!
//! This crate defines the question model, the CSV question loader, the
//! console input listener, and the quiz loop that races answers against a
//! single session-wide deadline.

pub mod config;
pub mod engine;
pub mod error;
pub mod input;
pub mod model;
pub mod parser;
pub mod report;
pub mod session;
