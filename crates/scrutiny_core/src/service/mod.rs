//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store, ledger and renderer calls into user-level flows.
//! - Keep surfaces decoupled from store error details.

pub mod annotation_session;
pub mod essay_service;
