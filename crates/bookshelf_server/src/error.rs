//! Error types for the request and process layers.

use crate::config::ConfigError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use bookshelf_core::{LoggingError, RepoError};
use log::error;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// JSON body for non-2xx responses that carry a message.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Failure of a single request after routing.
#[derive(Debug)]
pub enum ApiError {
    Store(RepoError),
    /// Blocking store task panicked or was cancelled.
    Task(tokio::task::JoinError),
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::Task(err) => write!(f, "store task failed: {err}"),
        }
    }
}

impl Error for ApiError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::Task(err) => Some(err),
        }
    }
}

impl From<RepoError> for ApiError {
    fn from(value: RepoError) -> Self {
        Self::Store(value)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Store(RepoError::Validation(_)) => StatusCode::BAD_REQUEST,
            Self::Store(_) | Self::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(
                "event=request_failed module=http status={} error={}",
                status.as_u16(),
                self
            );
        }
        (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

/// Fatal process-level failure.
#[derive(Debug)]
pub enum ServerError {
    Config(ConfigError),
    Logging(LoggingError),
    Store(RepoError),
    Bind {
        addr: String,
        source: std::io::Error,
    },
    Serve(std::io::Error),
}

impl Display for ServerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(err) => write!(f, "{err}"),
            Self::Logging(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "failed to open catalog: {err}"),
            Self::Bind { addr, source } => write!(f, "failed to bind {addr}: {source}"),
            Self::Serve(err) => write!(f, "server error: {err}"),
        }
    }
}

impl Error for ServerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Logging(err) => Some(err),
            Self::Store(err) => Some(err),
            Self::Bind { source, .. } => Some(source),
            Self::Serve(err) => Some(err),
        }
    }
}

impl From<ConfigError> for ServerError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<LoggingError> for ServerError {
    fn from(value: LoggingError) -> Self {
        Self::Logging(value)
    }
}

impl From<RepoError> for ServerError {
    fn from(value: RepoError) -> Self {
        Self::Store(value)
    }
}
