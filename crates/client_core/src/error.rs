use std::path::PathBuf;

use thiserror::Error;

use crate::endpoint::Endpoint;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: Endpoint,
        #[source]
        source: reqwest::Error,
    },
    #[error("{endpoint} returned HTTP {status}: {message}")]
    Status {
        endpoint: Endpoint,
        status: u16,
        message: String,
    },
    #[error("{endpoint} rejected the request: {message}")]
    Rejected { endpoint: Endpoint, message: String },
    #[error("{endpoint} returned an invalid payload: {reason}")]
    InvalidPayload { endpoint: Endpoint, reason: String },
    #[error("could not read '{}': {source}", .path.display())]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ClientError {
    /// The single string shown to the user for this failure.
    pub fn user_message(&self) -> String {
        match self {
            Self::Transport { source, .. } => format!("Could not reach the backend: {source}"),
            Self::Status { message, .. } | Self::Rejected { message, .. } => message.clone(),
            Self::InvalidPayload { reason, .. } => reason.clone(),
            Self::File { path, source } => format!("Could not read {}: {source}", path.display()),
        }
    }

    pub fn endpoint(&self) -> Option<Endpoint> {
        match self {
            Self::Transport { endpoint, .. }
            | Self::Status { endpoint, .. }
            | Self::Rejected { endpoint, .. }
            | Self::InvalidPayload { endpoint, .. } => Some(*endpoint),
            Self::File { .. } => None,
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }
}
