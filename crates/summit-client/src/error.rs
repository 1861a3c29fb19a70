use reqwest::StatusCode;
use thiserror::Error;

/// Failures talking to the hosted backend.
///
/// `Api` is a response the backend produced on purpose (bad credentials,
/// constraint violation, missing row); `Http` is transport-level — the
/// request never completed or the body was not what the endpoint promises.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{message}")]
    Api { status: StatusCode, message: String },

    /// The backend answered with an empty result set where exactly one row
    /// was expected (e.g. a `return=representation` insert).
    #[error("expected the backend to return a row")]
    MissingRow,

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl ClientError {
    /// Status code of an `Api` rejection, if that's what this is.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
