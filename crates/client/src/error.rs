use reqwest::StatusCode;

pub type Result<T> = std::result::Result<T, ClientError>;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// An operation that needs a bearer token ran without one. Raised
    /// before any network activity.
    #[error("No token provided")]
    Unauthenticated,
    /// The call succeeded at the transport level but came back with a
    /// status outside the documented set for that endpoint.
    #[error("Unexpected response status: {0}")]
    UnexpectedStatus(StatusCode),
    /// Non-success reply. `message` is whatever the backend put in the
    /// body, verbatim; use [`ClientError::kind`] for stable matching.
    #[error("{status}: {message}")]
    Server { status: StatusCode, message: String },
    /// Login answered with a success status but no usable token.
    #[error("No access token received")]
    MissingToken,
    /// The bearer token is not a decodable JWT.
    #[error("Invalid or expired token")]
    InvalidToken,
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("session storage error: {0}")]
    Storage(#[from] std::io::Error),
}

/// Stable categories for the backend's free-text error messages. The
/// server reports domain-rule violations as message strings, not codes,
/// so known substrings are matched here in one place.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ServerErrorKind {
    /// Unique-name constraint violation, surfaced by the database layer.
    DuplicateName,
    /// Budget window shorter than the one-month minimum.
    WindowTooShort,
    Other,
}

impl ServerErrorKind {
    pub fn classify(message: &str) -> Self {
        if message.contains("duplicate key value violates unique constraint") {
            ServerErrorKind::DuplicateName
        } else if message.contains("date range must be at least one month") {
            ServerErrorKind::WindowTooShort
        } else {
            ServerErrorKind::Other
        }
    }
}

impl ClientError {
    pub fn kind(&self) -> ServerErrorKind {
        match self {
            ClientError::Server { message, .. } => ServerErrorKind::classify(message),
            _ => ServerErrorKind::Other,
        }
    }

    /// Copy mirrored into repository `error()` state for banners. Server
    /// messages pass through verbatim; transport failures collapse to the
    /// generic fallback the app has always shown.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Server { message, .. } => message.clone(),
            ClientError::UnexpectedStatus(_) => "Unexpected response status".to_string(),
            ClientError::Network(_) | ClientError::Storage(_) => "An error occurred".to_string(),
            other => other.to_string(),
        }
    }
}
