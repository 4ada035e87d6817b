use std::fmt;

/// Failure talking to the calculation backend. Non-2xx statuses are a
/// uniform failure; the response body is not inspected in that case.
#[derive(Debug)]
pub enum ApiError {
    /// Network-level failure (connect, timeout, malformed body).
    Transport(reqwest::Error),
    /// Backend answered with a non-success status.
    Status(reqwest::StatusCode),
    /// Backend answered 2xx but flagged the request with an error message.
    Backend(String),
}

impl ApiError {
    /// Message fit for a user-facing notification: backend-supplied text is
    /// shown verbatim, anything else falls back to the caller's generic line.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Backend(message) => message.clone(),
            _ => fallback.to_string(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Transport(err) => write!(f, "backend request failed: {err}"),
            ApiError::Status(status) => write!(f, "backend returned {status}"),
            ApiError::Backend(message) => write!(f, "backend error: {message}"),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Transport(err) => Some(err),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Transport(err)
    }
}
