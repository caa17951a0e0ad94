//! Student validation engine.
//!
//! Provides the violation and result types plus a pure-logic evaluator,
//! all without database dependencies.

pub mod evaluator;
pub mod rules;
