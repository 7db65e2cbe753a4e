//! Essay provider boundary.
//!
//! # Responsibility
//! - Define the contract the core consumes to obtain essay text.
//! - Classify provider failures for user-facing messaging.
//!
//! # Invariants
//! - The core never performs network I/O itself; transports implement
//!   `EssayProvider` outside the core.
//! - Status classification happens here only, at the boundary.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod deepseek;

/// Source of generated essay text.
pub trait EssayProvider {
    /// Generates an essay for a non-blank topic.
    fn generate_essay(&self, topic: &str) -> Result<String, ApiError>;
}

impl<P: EssayProvider + ?Sized> EssayProvider for &P {
    fn generate_essay(&self, topic: &str) -> Result<String, ApiError> {
        (**self).generate_essay(topic)
    }
}

/// Provider failure as reported by the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// HTTP status, when the failure came from an HTTP response.
    pub status_code: Option<u16>,
    pub message: String,
}

impl ApiError {
    pub fn new(status_code: Option<u16>, message: impl Into<String>) -> Self {
        Self {
            status_code,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ApiErrorKind {
        match self.status_code {
            Some(401) => ApiErrorKind::Unauthorized,
            Some(429) => ApiErrorKind::RateLimited,
            Some(status) if (500..600).contains(&status) => ApiErrorKind::ServiceUnavailable,
            _ => ApiErrorKind::Other,
        }
    }

    /// Message safe to show in place of the document.
    pub fn user_message(&self) -> &'static str {
        self.kind().user_message()
    }
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.status_code {
            Some(status) => write!(f, "provider error (status {status}): {}", self.message),
            None => write!(f, "provider error: {}", self.message),
        }
    }
}

impl Error for ApiError {}

/// User-facing failure class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    Unauthorized,
    RateLimited,
    ServiceUnavailable,
    Other,
}

impl ApiErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unauthorized => "unauthorized",
            Self::RateLimited => "rate_limited",
            Self::ServiceUnavailable => "service_unavailable",
            Self::Other => "other",
        }
    }

    pub fn user_message(self) -> &'static str {
        match self {
            Self::Unauthorized => "Invalid API key. Please check your configuration.",
            Self::RateLimited => "Too many requests. Please wait a moment and try again.",
            Self::ServiceUnavailable => {
                "The essay service is currently unavailable. Please try again later."
            }
            Self::Other => "Failed to generate essay. Please try again.",
        }
    }
}
