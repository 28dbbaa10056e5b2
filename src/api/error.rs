use thiserror::Error;

/// Errors that can occur when talking to the board server.
///
/// The taxonomy mirrors what the UI needs to distinguish: no response at all,
/// a response carrying a server error payload, or a response whose body does
/// not conform to the expected shape. All variants are reported through the
/// notice layer and swallowed; nothing at this level retries or propagates
/// past the event handler.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network-level error (DNS, connection, TLS, etc.)
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),
    /// Request exceeded the timeout
    #[error("Request timed out")]
    Timeout,
    /// Non-2xx response with no recognizable error payload
    #[error("HTTP error: status {0}")]
    Status(u16),
    /// Non-2xx response carrying a server error code payload
    #[error("Server error: {code}")]
    Server { code: String },
    /// Response received but not shape-conforming
    #[error("Malformed response: {0}")]
    Malformed(String),
    /// Operation requires a session credential and none is present
    #[error("Not signed in")]
    NoSession,
}

impl ApiError {
    /// Stable identifier for toast-style notice deduplication.
    ///
    /// Server errors key on their code so distinct server conditions surface
    /// as distinct notices; everything else keys on the failure class.
    pub fn toast_id(&self) -> String {
        match self {
            ApiError::Network(_) => "no-server-connection".to_string(),
            ApiError::Timeout => "request-timeout".to_string(),
            ApiError::Status(status) => format!("http-{}", status),
            ApiError::Server { code } => code.clone(),
            ApiError::Malformed(_) => "malformed-response".to_string(),
            ApiError::NoSession => "login-required".to_string(),
        }
    }
}
