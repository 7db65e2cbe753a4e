//! Core annotation engine for Scrutiny.
//! This crate is the single source of truth for range, overlap and
//! suggestion-link invariants; surfaces only draw what it derives.

pub mod config;
pub mod logging;
pub mod model;
pub mod provider;
pub mod render;
pub mod selection;
pub mod service;
pub mod store;

pub use config::{ConfigError, CoreConfig, LoggingConfig, ProviderConfig, ViewerConfig};
pub use logging::{default_log_level, init_from_config, init_logging, logging_status, LoggingError};
pub use model::annotation::{Annotation, AnnotationId};
pub use model::range::{RangeError, TextRange};
pub use model::suggestion::{Suggestion, SuggestionId};
pub use model::taxonomy::{all_codes, find_code, groups, CodeEntry, CodeGroup, Color, ColorError};
pub use provider::{ApiError, ApiErrorKind, EssayProvider};
pub use render::popup::{DismissToken, HoverPopup, PopupAnchor, PopupView};
pub use render::segment::{render_segments, RenderedSegment, Segment, Segments};
pub use render::suggestion_view::{suggestion_views, AnnotationSlot, EvidenceSlot, SuggestionView};
pub use selection::{resolve_text, RenderedSelection, SegmentPoint, SelectionInput};
pub use service::annotation_session::{AnnotationSession, DocumentView, SelectionOutcome};
pub use service::essay_service::{EssayError, EssayService};
pub use store::annotation_store::{AnnotationRejection, AnnotationStore};
pub use store::draft::EditDraft;
pub use store::suggestion_ledger::{SuggestionError, SuggestionLedger};

/// Minimal health-check API for surface wiring.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
