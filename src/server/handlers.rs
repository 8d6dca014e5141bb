//! HTTP handlers

use axum::{
    body::Bytes,
    extract::{
        Multipart, State,
        multipart::{MultipartError, MultipartRejection},
        rejection::BytesRejection,
    },
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Json, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{debug, info};

use crate::service::{
    NO_FILE_PROVIDED, NO_FILE_SELECTED, NO_JSON_PROVIDED, Outcome, PAYLOAD_TOO_LARGE,
    PayloadSource, ValidationService,
};

const INDEX_PAGE: &str = include_str!("../../static/index.html");
const SWAGGER_PAGE: &str = include_str!("../../static/swagger.html");

const UPLOAD_FIELD: &str = "file";

#[derive(Clone)]
pub struct AppState {
    pub service: ValidationService,
    pub api_doc: Arc<Value>,
}

impl IntoResponse for Outcome {
    fn into_response(self) -> Response {
        let message = self.message();
        if self.is_success() {
            (StatusCode::OK, Json(json!({ "message": message }))).into_response()
        } else {
            (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
        }
    }
}

fn payload_too_large() -> Response {
    (
        StatusCode::PAYLOAD_TOO_LARGE,
        Json(json!({ "error": PAYLOAD_TOO_LARGE })),
    )
        .into_response()
}

/// `application/json` or any `+json` media type, parameters ignored.
fn is_json_content_type(headers: &HeaderMap) -> bool {
    let Some(value) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
    else {
        return false;
    };
    let essence = value
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    essence == "application/json" || (essence.ends_with("+json") && essence.len() > "+json".len())
}

fn log_outcome(route: &str, outcome: &Outcome) {
    match outcome {
        Outcome::Valid(_) => info!("[Server] {route}: data model is valid"),
        other => debug!("[Server] {route}: rejected: {}", other.message()),
    }
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Health check endpoint
pub async fn health() -> Json<HealthResponse> {
    debug!("[Server] Health check");
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

pub async fn index() -> Html<&'static str> {
    Html(INDEX_PAGE)
}

pub async fn swagger_ui() -> Html<&'static str> {
    Html(SWAGGER_PAGE)
}

pub async fn swagger_json(State(state): State<AppState>) -> Json<Value> {
    Json(state.api_doc.as_ref().clone())
}

/// Validate a JSON document sent as the request body.
pub async fn validate_body(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    if !is_json_content_type(&headers) {
        debug!("[Server] /api/validate: request is not application/json");
        return Outcome::Rejected(NO_JSON_PROVIDED).into_response();
    }
    let body = match body {
        Ok(body) => body,
        Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            return payload_too_large();
        }
        Err(rejection) => {
            debug!("[Server] /api/validate: unreadable body: {rejection}");
            return Outcome::Malformed(PayloadSource::Body).into_response();
        }
    };

    let outcome = state.service.evaluate_bytes(&body, PayloadSource::Body);
    log_outcome("/api/validate", &outcome);
    outcome.into_response()
}

/// Validate a JSON document uploaded as the multipart field `file`.
pub async fn upload(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response {
    let Ok(mut multipart) = multipart else {
        return Outcome::Rejected(NO_FILE_PROVIDED).into_response();
    };

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => return Outcome::Rejected(NO_FILE_PROVIDED).into_response(),
            Err(err) => return multipart_failure(err),
        };

        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        // a part without a filename is a plain form value, not a file
        match field.file_name() {
            None => continue,
            Some("") => return Outcome::Rejected(NO_FILE_SELECTED).into_response(),
            Some(name) => debug!("[Server] /upload: received {name}"),
        }

        let bytes = match field.bytes().await {
            Ok(bytes) => bytes,
            Err(err) => return multipart_failure(err),
        };
        let outcome = state.service.evaluate_bytes(&bytes, PayloadSource::Upload);
        log_outcome("/upload", &outcome);
        return outcome.into_response();
    }
}

fn multipart_failure(err: MultipartError) -> Response {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return payload_too_large();
    }
    debug!("[Server] /upload: malformed multipart body: {err}");
    Outcome::Malformed(PayloadSource::Upload).into_response()
}
