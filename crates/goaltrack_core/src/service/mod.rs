//! Core use-case services.
//!
//! # Responsibility
//! - Own in-memory state and orchestrate repository writes around it.
//! - Keep CLI/FFI layers decoupled from storage details.

pub mod objective_service;
pub mod preference_service;
