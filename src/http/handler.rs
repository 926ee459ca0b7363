//! The echo handler.

use axum::{
    body::Body,
    extract::State,
    http::{header, Request, StatusCode},
    response::{IntoResponse, Response},
};

use crate::http::error::EchoError;
use crate::http::request::{remote_addr, request_host, request_target};
use crate::http::server::AppState;
use crate::reflect::{
    body_text, flatten_headers, flatten_query, reconstruct_url, resolve_origin, sniff_json,
    EchoResponse,
};

/// Reflect any request back as an indented JSON document.
///
/// Everything except the body is derived before the body is read; a failed
/// read short-circuits with a 500 and no JSON.
pub async fn echo_handler(
    State(state): State<AppState>,
    request: Request<Body>,
) -> Result<Response, EchoError> {
    let remote = remote_addr(request.extensions());
    let (parts, body) = request.into_parts();

    let headers = flatten_headers(&parts.headers);
    let params = flatten_query(parts.uri.query());
    let host = request_host(&parts.uri, &parts.headers);
    let url = reconstruct_url(&headers, &host, request_target(&parts.uri));
    let origin = resolve_origin(&headers, remote);

    let read = axum::body::to_bytes(body, state.max_body_size);
    let body = match state.read_timeout {
        Some(limit) => tokio::time::timeout(limit, read)
            .await
            .map_err(|_| EchoError::BodyTimeout(limit))?,
        None => read.await,
    }
    .map_err(EchoError::BodyRead)?;

    let response = EchoResponse {
        data: body_text(&body),
        headers,
        json: sniff_json(&body),
        method: parts.method.to_string(),
        origin,
        params,
        url,
    };

    let encoded = response.into_pretty_json()?;

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        encoded,
    )
        .into_response())
}
