//! Essay generation use-case service.
//!
//! # Responsibility
//! - Validate topics before reaching the provider.
//! - Log request outcomes as metadata (topic/essay lengths, status class).

use crate::provider::{ApiError, EssayProvider};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Essay generation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EssayError {
    /// Topic is blank after trim. The provider was not called.
    EmptyTopic,
    Provider(ApiError),
}

impl EssayError {
    /// Message the surface shows in place of the document.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::EmptyTopic => "Please enter an essay topic.",
            Self::Provider(err) => err.user_message(),
        }
    }
}

impl Display for EssayError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTopic => write!(f, "essay topic must not be blank"),
            Self::Provider(err) => write!(f, "{err}"),
        }
    }
}

impl Error for EssayError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Provider(err) => Some(err),
            Self::EmptyTopic => None,
        }
    }
}

impl From<ApiError> for EssayError {
    fn from(value: ApiError) -> Self {
        Self::Provider(value)
    }
}

/// Service facade over an `EssayProvider`.
pub struct EssayService<P: EssayProvider> {
    provider: P,
}

impl<P: EssayProvider> EssayService<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Requests an essay for `topic`.
    ///
    /// # Errors
    /// - `EmptyTopic` for blank input.
    /// - `Provider` with the transport's error unchanged.
    pub fn generate(&self, topic: &str) -> Result<String, EssayError> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(EssayError::EmptyTopic);
        }

        match self.provider.generate_essay(topic) {
            Ok(essay) => {
                info!(
                    "event=essay_generate module=service status=ok topic_len={} essay_len={}",
                    topic.len(),
                    essay.len()
                );
                Ok(essay)
            }
            Err(err) => {
                warn!(
                    "event=essay_generate module=service status=error kind={} status_code={}",
                    err.kind().as_str(),
                    err.status_code
                        .map(|code| code.to_string())
                        .unwrap_or_else(|| "none".to_string())
                );
                Err(err.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{EssayError, EssayService};
    use crate::provider::{ApiError, EssayProvider};
    use std::cell::Cell;

    struct CountingProvider {
        calls: Cell<usize>,
        result: Result<String, ApiError>,
    }

    impl EssayProvider for CountingProvider {
        fn generate_essay(&self, _topic: &str) -> Result<String, ApiError> {
            self.calls.set(self.calls.get() + 1);
            self.result.clone()
        }
    }

    #[test]
    fn blank_topic_never_reaches_provider() {
        let provider = CountingProvider {
            calls: Cell::new(0),
            result: Ok("unused".to_string()),
        };
        let service = EssayService::new(&provider);
        assert_eq!(service.generate("   "), Err(EssayError::EmptyTopic));
        assert_eq!(provider.calls.get(), 0);
    }

    #[test]
    fn provider_failure_keeps_api_error() {
        let provider = CountingProvider {
            calls: Cell::new(0),
            result: Err(ApiError::new(Some(429), "slow down")),
        };
        let service = EssayService::new(&provider);
        let err = service.generate("bees").expect_err("provider fails");
        assert_eq!(
            err.user_message(),
            "Too many requests. Please wait a moment and try again."
        );
        assert_eq!(provider.calls.get(), 1);
    }
}
