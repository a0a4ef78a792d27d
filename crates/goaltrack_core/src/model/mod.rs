//! Domain model for objectives and display preferences.
//!
//! # Responsibility
//! - Define the canonical objective record and its serialized shape.
//! - Parse raw form input into typed drafts.
//! - Hold the two independent display preferences.
//!
//! # Invariants
//! - Every objective is identified by a stable `ObjectiveId`.
//! - Progress values are non-negative by construction.

pub mod form;
pub mod objective;
pub mod preferences;
