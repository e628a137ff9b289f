//! Unified error type for httpsvc.
//!
//! [`HttpsvcError`] covers the log-level endpoint's client errors, server
//! startup failures, and the `health` subcommand's transport errors. The
//! endpoint-facing variants convert into JSON error responses through
//! [`IntoResponse`].

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum HttpsvcError {
    #[error("unrecognized level: {0:?}")]
    InvalidLevelName(String),

    #[error("malformed level request: {0}")]
    MalformedLevelRequest(String),

    #[error("failed to reload log filter: {0}")]
    LogReload(String),

    #[error("Cannot open log file: {0}")]
    LogFile(#[from] tracing_appender::rolling::InitError),

    #[error("Invalid address: {0}")]
    AddressParse(#[from] std::net::AddrParseError),

    #[error("Invalid URI: {source}")]
    UriParse {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("HTTP request failed: {source}")]
    HttpRequest {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("Health check failed with status {0}")]
    HealthCheckFailed(hyper::StatusCode),

    #[error("Health check returned unexpected body: {0:?}")]
    UnexpectedHealthBody(String),
}

impl HttpsvcError {
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidLevelName(_) | Self::MalformedLevelRequest(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for HttpsvcError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (
            status,
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_level_message_quotes_the_name() {
        let err = HttpsvcError::InvalidLevelName("loud".into());
        assert_eq!(err.to_string(), "unrecognized level: \"loud\"");
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn reload_failure_is_a_server_error() {
        let err = HttpsvcError::LogReload("subscriber dropped".into());
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
