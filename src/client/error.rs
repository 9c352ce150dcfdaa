use thiserror::Error;

pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors from talking to the backend. Nothing here is retried.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Connection, TLS or protocol failure
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with a non-success status
    #[error("Backend returned {status}: {detail}")]
    Status { status: u16, detail: String },

    /// The body did not match the expected shape
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid backend URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            ClientError::Transport(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// The backend refused the bearer token, or none was sent
    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401) | Some(403))
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}
