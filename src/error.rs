use thiserror::Error;

use crate::domain::error::DomainError;
use crate::domain::order::MakedOrder;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("client not initialized: call init before private operations")]
    NotInitialized,

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Failures reported by, or on the way to, the remote venue.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RemoteError {
    #[error("transport failure: {0}")]
    Transport(String),

    #[error("venue rejected request ({code}): {message}")]
    Rejected { code: String, message: String },

    #[error("rate limited")]
    RateLimited { retry_after_secs: Option<u64> },

    #[error("invalid venue response: {0}")]
    InvalidResponse(String),
}

/// Coarse classification callers branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    InvalidParameter,
    NotFound,
    Unsupported,
    Remote,
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("invalid parameter {parameter}: {reason}")]
    InvalidParameter {
        parameter: &'static str,
        reason: String,
    },

    #[error("not found: {0}")]
    NotFound(String),

    #[error("unsupported operation: {0}")]
    Unsupported(String),

    #[error(transparent)]
    Remote(#[from] RemoteError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The order reached the venue but its status could not be resolved.
    #[error("order {} placed but status unresolved: {source}", .order.id)]
    Unresolved {
        order: Box<MakedOrder>,
        #[source]
        source: Box<Error>,
    },

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Shorthand for an [`Error::InvalidParameter`].
    pub fn invalid(parameter: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            parameter,
            reason: reason.into(),
        }
    }

    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Config(_) => ErrorKind::Configuration,
            Self::InvalidParameter { .. } => ErrorKind::InvalidParameter,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Unsupported(_) => ErrorKind::Unsupported,
            Self::Unresolved { source, .. } => source.kind(),
            Self::Domain(err) if err.is_parameter() => ErrorKind::InvalidParameter,
            Self::Remote(_) | Self::Domain(_) | Self::Json(_) | Self::Io(_) => ErrorKind::Remote,
        }
    }

    /// True for failures a caller may reasonably retry: transport hiccups
    /// and rate limiting. Never true for a partially placed order.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Remote(RemoteError::Transport(_) | RemoteError::RateLimited { .. }) | Self::Io(_)
        )
    }

    /// The order carried by an [`Error::Unresolved`].
    #[must_use]
    pub fn partial_order(&self) -> Option<&MakedOrder> {
        match self {
            Self::Unresolved { order, .. } => Some(order),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::domain::maked_order;

    #[test]
    fn kinds_are_distinguishable() {
        assert_eq!(
            Error::from(ConfigError::NotInitialized).kind(),
            ErrorKind::Configuration
        );
        assert_eq!(
            Error::invalid("period", "2d").kind(),
            ErrorKind::InvalidParameter
        );
        assert_eq!(Error::NotFound("x".into()).kind(), ErrorKind::NotFound);
        assert_eq!(
            Error::Unsupported("cancel_all".into()).kind(),
            ErrorKind::Unsupported
        );
        assert_eq!(
            Error::from(RemoteError::Transport("reset".into())).kind(),
            ErrorKind::Remote
        );
    }

    #[test]
    fn only_transport_and_rate_limit_are_retryable() {
        assert!(Error::from(RemoteError::Transport("timeout".into())).is_retryable());
        assert!(Error::from(RemoteError::RateLimited {
            retry_after_secs: Some(1)
        })
        .is_retryable());
        assert!(!Error::from(RemoteError::Rejected {
            code: "400".into(),
            message: "bad".into()
        })
        .is_retryable());
        assert!(!Error::NotFound("id".into()).is_retryable());
    }

    #[test]
    fn unresolved_exposes_order_and_source_kind() {
        let err = Error::Unresolved {
            order: Box::new(maked_order("abc")),
            source: Box::new(RemoteError::Transport("reset".into()).into()),
        };

        assert_eq!(err.partial_order().map(|o| o.id.as_str()), Some("abc"));
        assert_eq!(err.kind(), ErrorKind::Remote);
        assert!(!err.is_retryable());
        assert!(err.to_string().contains("abc"));
    }
}
