//! Handler errors and their HTTP mapping.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Body text sent when the request body cannot be read.
pub const BODY_READ_MESSAGE: &str = "An error occurred while reading the request body";

/// Body text sent when the echo document cannot be serialized.
pub const ENCODE_MESSAGE: &str = "An error occurred while encoding the response";

/// Failures that abort handling of a single request.
#[derive(Debug, Error)]
pub enum EchoError {
    /// Client disconnect, transport error or size limit while reading the body.
    #[error("error reading the request body: {0}")]
    BodyRead(#[source] axum::Error),

    /// The body did not arrive within the server timeout.
    #[error("timed out reading the request body after {0:?}")]
    BodyTimeout(std::time::Duration),

    /// The echo document could not be serialized.
    #[error("error encoding the response: {0}")]
    Encode(#[from] serde_json::Error),
}

impl EchoError {
    fn public_message(&self) -> &'static str {
        match self {
            EchoError::BodyRead(_) | EchoError::BodyTimeout(_) => BODY_READ_MESSAGE,
            EchoError::Encode(_) => ENCODE_MESSAGE,
        }
    }
}

impl IntoResponse for EchoError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "request failed");

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            self.public_message(),
        )
            .into_response()
    }
}
