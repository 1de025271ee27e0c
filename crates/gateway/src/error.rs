use thiserror::Error;

/// Failure reaching or being rejected by the hosted platform.
///
/// Callers on the request path treat any of these as "subject absent" and
/// fail closed; only the auth routes surface them to users.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Network-level failure (connect, timeout, body read).
    #[error("provider request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The provider answered with a non-success status.
    #[error("provider rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// The session token pair is invalid or expired beyond refresh.
    #[error("session is not authenticated")]
    Unauthenticated,

    /// The provider answered 2xx but the body did not parse.
    #[error("malformed provider response: {0}")]
    Malformed(String),
}

impl GatewayError {
    pub fn rejected(status: u16, message: impl Into<String>) -> Self {
        Self::Rejected {
            status,
            message: message.into(),
        }
    }
}
