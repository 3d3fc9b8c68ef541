//! Client error taxonomy.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Failure of a remote call or a locally rejected request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// The request never produced a response (connect, timeout, I/O).
    Transport(String),
    /// The server answered with a non-success status.
    Status { status: u16, message: String },
    /// The response body did not have the expected shape.
    Decode(String),
    /// Rejected before any request was sent.
    InvalidInput(String),
}

pub type ClientResult<T> = Result<T, ClientError>;

impl ClientError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

impl Display for ClientError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport(details) => write!(f, "request failed: {details}"),
            Self::Status { status, message } if message.is_empty() => {
                write!(f, "server returned HTTP {status}")
            }
            Self::Status { status, message } => {
                write!(f, "server returned HTTP {status}: {message}")
            }
            Self::Decode(details) => write!(f, "unexpected response: {details}"),
            Self::InvalidInput(details) => write!(f, "invalid input: {details}"),
        }
    }
}

impl Error for ClientError {}

impl From<reqwest::Error> for ClientError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_decode() {
            Self::Decode(value.to_string())
        } else {
            Self::Transport(value.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_display_includes_server_message() {
        let err = ClientError::Status {
            status: 500,
            message: "Duplicate entry 'a'".to_string(),
        };
        assert_eq!(err.to_string(), "server returned HTTP 500: Duplicate entry 'a'");
    }

    #[test]
    fn status_display_without_message() {
        let err = ClientError::Status {
            status: 404,
            message: String::new(),
        };
        assert_eq!(err.to_string(), "server returned HTTP 404");
    }
}
