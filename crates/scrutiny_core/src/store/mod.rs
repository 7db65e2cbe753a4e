//! In-memory stores owning annotation and suggestion records.
//!
//! # Responsibility
//! - Hold process-lifetime state for one editing session.
//! - Return semantic errors (`NotFound`, `Overlap`) instead of panicking.
//!
//! # Invariants
//! - The annotation store is the single source of truth for annotation
//!   fields; the ledger references annotations by ID only.

pub mod annotation_store;
pub mod draft;
pub mod overlap_guard;
pub mod suggestion_ledger;
