use thiserror::Error;

use crate::messages;

#[derive(Error, Debug)]
pub enum Error {
    /// Required input missing. Raised before any network traffic.
    #[error("{0}")]
    Validation(String),

    /// The call failed at the network level or came back with a non-2xx status.
    #[error("{message}")]
    Transport { status: Option<u16>, message: String },

    /// The service answered but reported `success: false`.
    #[error("{0}")]
    Application(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// The three outcomes a single submission can fail with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Transport,
    Application,
}

impl Error {
    pub fn missing_input() -> Self {
        Error::Validation(messages::VALIDATION_REQUIRED.to_string())
    }

    /// Transport failure with a status code. Falls back to the generic
    /// HTTP message when the server gave no usable `detail`.
    pub fn http_status(status: u16, detail: Option<String>) -> Self {
        Error::Transport {
            status: Some(status),
            message: non_empty(detail).unwrap_or_else(|| messages::HTTP_FAILURE.to_string()),
        }
    }

    pub fn network() -> Self {
        Error::Transport {
            status: None,
            message: messages::NETWORK_FAILURE.to_string(),
        }
    }

    pub fn application(message: Option<String>) -> Self {
        Error::Application(
            non_empty(message).unwrap_or_else(|| messages::SEARCH_FAILED.to_string()),
        )
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Validation(_) => ErrorKind::Validation,
            Error::Application(_) => ErrorKind::Application,
            _ => ErrorKind::Transport,
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_prefers_detail() {
        let err = Error::http_status(500, Some("rate limited".to_string()));
        assert_eq!(err.to_string(), "rate limited");
        assert_eq!(err.kind(), ErrorKind::Transport);
        assert!(matches!(err, Error::Transport { status: Some(500), .. }));
    }

    #[test]
    fn test_fallback_messages() {
        assert_eq!(Error::http_status(502, None).to_string(), messages::HTTP_FAILURE);
        assert_eq!(
            Error::http_status(502, Some("  ".to_string())).to_string(),
            messages::HTTP_FAILURE
        );
        assert_eq!(Error::network().to_string(), messages::NETWORK_FAILURE);
        assert_eq!(Error::application(None).to_string(), messages::SEARCH_FAILED);
        assert_eq!(
            Error::application(Some(String::new())).to_string(),
            messages::SEARCH_FAILED
        );
    }

    #[test]
    fn test_kinds() {
        assert_eq!(Error::missing_input().kind(), ErrorKind::Validation);
        assert_eq!(Error::application(None).kind(), ErrorKind::Application);
        assert_eq!(Error::network().kind(), ErrorKind::Transport);
    }
}
