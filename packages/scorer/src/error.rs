use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScoringError {
    /// The scorer refused the input (HTTP 422). Carries the diagnostic body verbatim.
    #[error("scoring rejected: {body}")]
    Rejected { body: String },

    /// Any other non-success status.
    #[error("scoring service returned status {status}")]
    Status { status: u16, body: String },

    /// Connection, timeout or body transfer failure.
    #[error("network error: {0}")]
    Network(String),

    /// A 200 response whose body could not be parsed.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("client configuration error: {0}")]
    Config(String),
}

impl ScoringError {
    /// The failure is attributable to the submitted data, not to infrastructure.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }

    /// Whether re-running the whole workflow later may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Status { .. } | Self::Network(_) | Self::InvalidResponse(_)
        )
    }
}

impl From<reqwest::Error> for ScoringError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}
