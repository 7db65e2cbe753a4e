//! Domain model for the annotation engine.
//!
//! # Responsibility
//! - Define the canonical records shared by the store, ledger and renderer.
//!
//! # Invariants
//! - Every record is identified by a stable UUID.
//! - Offsets always index the canonical source text, never rendered output.

pub mod annotation;
pub mod range;
pub mod suggestion;
pub mod taxonomy;
