//! Display derivation for surfaces.
//!
//! Everything here is recomputed from store state on demand; no rendered
//! output is cached between calls.

pub mod popup;
pub mod segment;
pub mod suggestion_view;
