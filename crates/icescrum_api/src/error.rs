//! Error model used by iceScrum connector operations.

use reqwest::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, IceScrumError>;

/// Represents the failure modes of an iceScrum fetch: unusable settings, classified HTTP statuses, an empty self-test, and transport or decoding problems.
#[derive(Debug, Error)]
pub enum IceScrumError {
    #[error("settings missing: {0}")]
    NotConfigured(String),
    #[error("web services aren't activated on your project")]
    ServiceUnavailable,
    #[error("wrong login/password")]
    Unauthorized,
    #[error("you don't have access to this project")]
    Forbidden,
    #[error("no project or iceScrum server found")]
    NotFound,
    #[error("server error ({reason})")]
    Server { status: StatusCode, reason: String },
    #[error("no results fetched, are the settings correct?")]
    EmptyResult,
    #[error("request timed out: {0}")]
    Timeout(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("serialization error: {0}")]
    Serialization(String),
    #[error("unexpected error: {0}")]
    Other(String),
}

impl IceScrumError {
    /// Maps a non-success HTTP status to the error reported to the user.
    pub fn from_status(status: StatusCode) -> Self {
        match status {
            StatusCode::SERVICE_UNAVAILABLE => IceScrumError::ServiceUnavailable,
            StatusCode::UNAUTHORIZED => IceScrumError::Unauthorized,
            StatusCode::FORBIDDEN => IceScrumError::Forbidden,
            StatusCode::NOT_FOUND => IceScrumError::NotFound,
            other => IceScrumError::Server {
                status: other,
                reason: other
                    .canonical_reason()
                    .map(str::to_string)
                    .unwrap_or_else(|| other.as_u16().to_string()),
            },
        }
    }

    /// Returns the HTTP status behind this error, when the server produced one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            IceScrumError::ServiceUnavailable => Some(StatusCode::SERVICE_UNAVAILABLE),
            IceScrumError::Unauthorized => Some(StatusCode::UNAUTHORIZED),
            IceScrumError::Forbidden => Some(StatusCode::FORBIDDEN),
            IceScrumError::NotFound => Some(StatusCode::NOT_FOUND),
            IceScrumError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for IceScrumError {
    /// Converts reqwest errors into semantic IceScrumError variants.
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            IceScrumError::Timeout(err.to_string())
        } else if let Some(status) = err.status() {
            IceScrumError::from_status(status)
        } else if err.is_connect() {
            IceScrumError::Network(err.to_string())
        } else if err.is_decode() {
            IceScrumError::Serialization(err.to_string())
        } else {
            IceScrumError::Other(err.to_string())
        }
    }
}

impl From<serde_json::Error> for IceScrumError {
    /// Converts serde_json decode failures into serialization errors.
    fn from(err: serde_json::Error) -> Self {
        IceScrumError::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::IceScrumError;
    use reqwest::StatusCode;

    #[test]
    fn documented_statuses_map_to_distinct_kinds() {
        assert!(matches!(
            IceScrumError::from_status(StatusCode::SERVICE_UNAVAILABLE),
            IceScrumError::ServiceUnavailable
        ));
        assert!(matches!(
            IceScrumError::from_status(StatusCode::UNAUTHORIZED),
            IceScrumError::Unauthorized
        ));
        assert!(matches!(
            IceScrumError::from_status(StatusCode::FORBIDDEN),
            IceScrumError::Forbidden
        ));
        assert!(matches!(
            IceScrumError::from_status(StatusCode::NOT_FOUND),
            IceScrumError::NotFound
        ));
    }

    #[test]
    fn other_statuses_carry_status_text() {
        let err = IceScrumError::from_status(StatusCode::INTERNAL_SERVER_ERROR);
        match &err {
            IceScrumError::Server { status, reason } => {
                assert_eq!(*status, StatusCode::INTERNAL_SERVER_ERROR);
                assert_eq!(reason, "Internal Server Error");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(err.to_string(), "server error (Internal Server Error)");
        assert_eq!(err.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
    }

    #[test]
    fn unknown_status_falls_back_to_numeric_reason() {
        let status = StatusCode::from_u16(599).expect("valid status code");
        match IceScrumError::from_status(status) {
            IceScrumError::Server { reason, .. } => assert_eq!(reason, "599"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn serde_errors_become_serialization_errors() {
        let err = serde_json::from_str::<Vec<u8>>("{").unwrap_err();
        assert!(matches!(
            IceScrumError::from(err),
            IceScrumError::Serialization(_)
        ));
    }
}
