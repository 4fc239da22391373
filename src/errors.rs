use reqwest::StatusCode;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Transport,
    Status(StatusCode),
    Decode,
    Config,
    UnknownItem,
    Unsupported,
}

#[derive(Debug)]
pub struct ClientError {
    pub kind: ErrorKind,
    pub message: String,
}

impl ClientError {
    pub fn transport(err: impl std::error::Error) -> Self {
        Self {
            kind: ErrorKind::Transport,
            message: err.to_string(),
        }
    }

    pub fn status(status: StatusCode, path: &str) -> Self {
        Self {
            kind: ErrorKind::Status(status),
            message: format!("{path} answered {status}"),
        }
    }

    pub fn decode(err: impl std::error::Error) -> Self {
        Self {
            kind: ErrorKind::Decode,
            message: err.to_string(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Config,
            message: message.into(),
        }
    }

    pub fn unknown_item(id: impl fmt::Display) -> Self {
        Self {
            kind: ErrorKind::UnknownItem,
            message: format!("unknown item {id}"),
        }
    }

    pub fn unsupported(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Unsupported,
            message: message.into(),
        }
    }
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ClientError {}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::decode(err)
        } else {
            Self::transport(err)
        }
    }
}
