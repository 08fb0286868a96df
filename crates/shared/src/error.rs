use thiserror::Error;

/// Failure talking to a vendor API.
///
/// Transport failures, non-success statuses and unreadable bodies all
/// collapse into this one kind; the status code is never carried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NetworkError {
    #[error("Network request failed: {0}")]
    Transport(String),
    #[error("Network response was not ok")]
    Status,
    #[error("Malformed response body: {0}")]
    Decode(String),
}

impl NetworkError {
    pub fn transport(err: impl std::fmt::Display) -> Self {
        Self::Transport(err.to_string())
    }

    pub fn decode(err: impl std::fmt::Display) -> Self {
        Self::Decode(err.to_string())
    }
}
