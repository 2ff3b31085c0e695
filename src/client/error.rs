use std::fmt;

/// Errors surfaced by the HTTP client and the resource gateway.
///
/// Everything except the single intercepted `401` bubbles unchanged to the
/// caller as one of these variants.
#[derive(Clone, Debug)]
pub enum ApiError {
    Config(String),
    Network(String),
    Http { status: u16, message: String },
    Parse(String),
    Serialization(String),
}

impl ApiError {
    /// HTTP status for `Http` errors, `None` otherwise.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(message) => write!(formatter, "Config error: {message}"),
            Self::Network(message) => write!(formatter, "Network error: {message}"),
            Self::Http { status, message } => {
                write!(formatter, "Request failed ({status}): {message}")
            }
            Self::Parse(message) => write!(formatter, "Response error: {message}"),
            Self::Serialization(message) => write!(formatter, "Request error: {message}"),
        }
    }
}

impl std::error::Error for ApiError {}
