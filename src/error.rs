use std::error::Error as StdError;
use std::io;

use thiserror::Error;

pub use anyhow::Context;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),
    #[error(transparent)]
    Dotenv(#[from] dotenvy::Error),
    #[error(transparent)]
    Join(#[from] tokio::task::JoinError),
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AppError {
    pub fn message<T: Into<String>>(msg: T) -> Self {
        AppError::Message(msg.into())
    }
}

/// Coarse failure class attached to every quote request that did not produce data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchErrorKind {
    Timeout,
    ConnectionLimit,
    ConnectionClosed,
    Decode,
    Other,
}

impl FetchErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FetchErrorKind::Timeout => "timeout",
            FetchErrorKind::ConnectionLimit => "conn_limit",
            FetchErrorKind::ConnectionClosed => "conn_close",
            FetchErrorKind::Decode => "decode",
            FetchErrorKind::Other => "other",
        }
    }
}

/// Failure of a single quote request. Rendered text stays short; details go to the log.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("timeout")]
    Timeout(String),
    #[error("connection limit exceeded")]
    ConnectionLimit,
    #[error("connection closed")]
    ConnectionClosed(String),
    #[error("HTTP {0}")]
    Status(u16),
    #[error("bad response")]
    Decode(String),
    #[error("request failed")]
    Other(String),
}

impl FetchError {
    pub fn kind(&self) -> FetchErrorKind {
        match self {
            FetchError::Timeout(_) => FetchErrorKind::Timeout,
            FetchError::ConnectionLimit => FetchErrorKind::ConnectionLimit,
            FetchError::ConnectionClosed(_) => FetchErrorKind::ConnectionClosed,
            FetchError::Decode(_) => FetchErrorKind::Decode,
            FetchError::Status(_) | FetchError::Other(_) => FetchErrorKind::Other,
        }
    }

    pub fn is_retryable(&self) -> bool {
        self.kind() == FetchErrorKind::Timeout
    }

    /// Internal detail for logging; empty for variants that carry none.
    pub fn detail(&self) -> &str {
        match self {
            FetchError::Timeout(detail)
            | FetchError::ConnectionClosed(detail)
            | FetchError::Decode(detail)
            | FetchError::Other(detail) => detail,
            FetchError::ConnectionLimit | FetchError::Status(_) => "",
        }
    }

    /// Classify a transport failure reported by the HTTP client.
    pub fn from_transport(err: &reqwest::Error) -> Self {
        let detail = describe_chain(err);

        if err.is_timeout() || err.is_connect() {
            return FetchError::Timeout(detail);
        }

        if source_chain_has_closed_connection(err) {
            return FetchError::ConnectionClosed(detail);
        }

        FetchError::Other(detail)
    }
}

/// Peer hung up: an EOF before the response completed, or a reset/aborted socket.
fn source_chain_has_closed_connection(err: &(dyn StdError + 'static)) -> bool {
    let mut cursor: Option<&(dyn StdError + 'static)> = Some(err);
    while let Some(current) = cursor {
        if let Some(hyper_err) = current.downcast_ref::<hyper::Error>() {
            if hyper_err.is_incomplete_message() || hyper_err.is_closed() {
                return true;
            }
        }
        if let Some(io_err) = current.downcast_ref::<io::Error>() {
            if matches!(
                io_err.kind(),
                io::ErrorKind::ConnectionReset
                    | io::ErrorKind::ConnectionAborted
                    | io::ErrorKind::BrokenPipe
                    | io::ErrorKind::UnexpectedEof
            ) {
                return true;
            }
        }
        cursor = current.source();
    }
    false
}

fn describe_chain(err: &(dyn StdError + 'static)) -> String {
    let mut parts = vec![err.to_string()];
    let mut cursor = err.source();
    while let Some(current) = cursor {
        parts.push(current.to_string());
        cursor = current.source();
    }
    parts.join(": ")
}
