//! Shared error types for the services crate.

use prep_core::PracticeError;
use reqwest::StatusCode;
use thiserror::Error;

/// Errors emitted by the backend client and the services built on it.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ServiceError {
    #[error(transparent)]
    Network(#[from] reqwest::Error),
    #[error("backend returned status {0}")]
    Status(StatusCode),
    /// 401 from the backend, or no token at all. The session token has been cleared.
    #[error("not signed in")]
    Unauthorized,
    #[error("unexpected response body: {0}")]
    Decode(String),
    #[error("{0}")]
    InvalidInput(String),
}

impl ServiceError {
    /// Whether this failure must force the user back to the login screen.
    #[must_use]
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }
}

impl From<ServiceError> for PracticeError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Unauthorized => Self::Auth,
            ServiceError::Status(status)
                if status == StatusCode::BAD_REQUEST
                    || status == StatusCode::UNPROCESSABLE_ENTITY =>
            {
                Self::Validation(format!("rejected with status {}", status.as_u16()))
            }
            ServiceError::InvalidInput(message) => Self::Validation(message),
            other => Self::Network(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthorized_maps_to_auth() {
        let err: PracticeError = ServiceError::Unauthorized.into();
        assert!(err.is_auth());
    }

    #[test]
    fn rejected_submission_maps_to_validation() {
        let err: PracticeError = ServiceError::Status(StatusCode::UNPROCESSABLE_ENTITY).into();
        assert_eq!(
            err,
            PracticeError::Validation("rejected with status 422".into())
        );
    }

    #[test]
    fn server_failure_maps_to_network() {
        let err: PracticeError = ServiceError::Status(StatusCode::INTERNAL_SERVER_ERROR).into();
        assert_eq!(
            err,
            PracticeError::Network("backend returned status 500 Internal Server Error".into())
        );
    }
}
