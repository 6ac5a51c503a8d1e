use thiserror::Error;

/// Failures reported back into the practice flow.
///
/// Only `Network` and `Auth` are produced by this client. `Validation` exists so that
/// a backend rejection of submitted answers can be surfaced with its own message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PracticeError {
    #[error("network error: {0}")]
    Network(String),
    #[error("session expired, please sign in again")]
    Auth,
    #[error("invalid submission: {0}")]
    Validation(String),
}

impl PracticeError {
    #[must_use]
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Auth)
    }
}
