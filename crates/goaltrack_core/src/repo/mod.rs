//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the key-value boundary every durable entry goes through.
//! - Map objectives and display preferences onto their storage keys.
//!
//! # Invariants
//! - Each logical entry is written whole; there is no partial update.
//! - Repository APIs return DB transport errors; malformed stored values are
//!   handled per entry (reset or ignored), never surfaced.

pub mod kv_repo;
pub mod objective_repo;
pub mod preference_repo;
