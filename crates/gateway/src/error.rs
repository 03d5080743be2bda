use reqwest::StatusCode;
use thiserror::Error;

/// Errors raised while talking to the upstream provider.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Transport failure: DNS, connect, TLS, timeout
    #[error("upstream unavailable: {0}")]
    UpstreamUnavailable(#[source] reqwest::Error),

    /// Upstream answered with a non-success status
    #[error("upstream returned {status}: {message}")]
    UpstreamStatus { status: StatusCode, message: String },

    /// Body could not be decoded or lacks a required field
    #[error("malformed upstream response: {0}")]
    MalformedResponse(String),

    #[error("invalid upstream URL: {0}")]
    InvalidUrl(String),
}

impl GatewayError {
    /// Short machine-friendly name of the error kind, used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            GatewayError::UpstreamUnavailable(_) => "upstream_unavailable",
            GatewayError::UpstreamStatus { .. } => "upstream_error",
            GatewayError::MalformedResponse(_) => "malformed_upstream_response",
            GatewayError::InvalidUrl(_) => "invalid_url",
        }
    }
}

pub type Result<T> = std::result::Result<T, GatewayError>;
