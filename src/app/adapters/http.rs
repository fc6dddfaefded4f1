//! HTTP front end
//!
//! - `GET /` returns service information
//! - `POST /parse-fridgetag/` accepts a multipart upload (field `file`) and
//!   returns the projected document in a `{success, filename, data}` envelope
//!
//! Status mapping: 400 for a non-`.txt` filename, 422 for a missing file or a
//! document that fails validation, 500 for anything else.

use crate::app::services::pipeline::{PipelineOptions, process_bytes};
use crate::app::services::schema::{FieldViolation, QTagDataOutput};
use crate::config::Config;
use crate::constants::{
    PARSE_ROUTE, SERVICE_DESCRIPTION, SUPPORTED_DEVICES, UPLOAD_EXTENSION, UPLOAD_FIELD,
};
use crate::{Error, Result};
use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::{DefaultBodyLimit, Multipart, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{debug, error, info, warn};

/// Settings the handlers need
#[derive(Debug, Clone)]
struct AppState {
    require_txt_extension: bool,
}

/// Service information returned by `GET /`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub message: String,
    pub service: String,
    pub supported_devices: Vec<String>,
    pub version: String,
}

impl Default for ServiceInfo {
    fn default() -> Self {
        Self {
            message: "Berlinger Fridge Tag API is running".to_string(),
            service: SERVICE_DESCRIPTION.to_string(),
            supported_devices: SUPPORTED_DEVICES.iter().map(|d| d.to_string()).collect(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Successful parse response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseResponse {
    pub success: bool,
    pub filename: String,
    pub data: QTagDataOutput,
}

#[derive(Debug, Default, Deserialize)]
struct ParseQuery {
    debug: Option<String>,
}

/// Errors returned to HTTP clients as `{"detail": ...}`
#[derive(Debug)]
pub enum ApiError {
    /// Upload rejected before parsing
    BadRequest(String),
    /// No usable multipart `file` field
    MissingFile(String),
    /// Multipart stream could not be read
    Multipart(MultipartError),
    /// Document failed validation
    Validation(Vec<FieldViolation>),
    /// Anything else
    Unexpected(String),
}

impl From<MultipartError> for ApiError {
    fn from(error: MultipartError) -> Self {
        ApiError::Multipart(error)
    }
}

impl From<Error> for ApiError {
    fn from(error: Error) -> Self {
        match error {
            Error::Validation(err) => ApiError::Validation(err.into_violations()),
            other => ApiError::Unexpected(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(detail) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "detail": detail }))).into_response()
            }
            ApiError::MissingFile(detail) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "detail": detail })),
            )
                .into_response(),
            ApiError::Multipart(err) => {
                (err.status(), Json(json!({ "detail": err.body_text() }))).into_response()
            }
            ApiError::Validation(violations) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({
                    "detail": {
                        "message": "Validation failed",
                        "errors": violations,
                    }
                })),
            )
                .into_response(),
            ApiError::Unexpected(message) => {
                error!("An unexpected error occurred: {}", message);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "detail": format!("An unexpected error occurred: {}", message)
                    })),
                )
                    .into_response()
            }
        }
    }
}

/// Build the service router
pub fn router(config: &Config) -> Router {
    let state = Arc::new(AppState {
        require_txt_extension: config.server.require_txt_extension,
    });

    Router::new()
        .route("/", get(service_info))
        .route(PARSE_ROUTE, post(parse_upload))
        .layer(DefaultBodyLimit::max(config.server.max_upload_bytes))
        .with_state(state)
}

/// Bind and serve until Ctrl+C
pub async fn serve(config: &Config) -> Result<()> {
    let address = config.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|e| Error::server(format!("Failed to bind {}", address), e))?;

    info!("Fridge-tag API listening on http://{}", address);
    axum::serve(listener, router(config))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| Error::server("HTTP server stopped unexpectedly", e))?;

    info!("Fridge-tag API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}

async fn service_info() -> Json<ServiceInfo> {
    Json(ServiceInfo::default())
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

async fn parse_upload(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ParseQuery>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> std::result::Result<Json<ParseResponse>, ApiError> {
    let mut multipart = multipart.map_err(|rejection| {
        ApiError::MissingFile(format!("Expected a multipart upload: {}", rejection.body_text()))
    })?;

    let mut debug_mode = query.debug.as_deref().is_some_and(parse_flag);
    let mut upload = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some(UPLOAD_FIELD) => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let bytes = field.bytes().await?;
                upload = Some((filename, bytes));
            }
            Some("debug") => {
                debug_mode = parse_flag(&field.text().await?);
            }
            other => debug!("Ignoring multipart field {:?}", other),
        }
    }

    let Some((filename, bytes)) = upload else {
        return Err(ApiError::MissingFile(format!(
            "Missing multipart field '{}'",
            UPLOAD_FIELD
        )));
    };

    if state.require_txt_extension && !filename.ends_with(UPLOAD_EXTENSION) {
        return Err(ApiError::BadRequest(format!(
            "File must be a {} file",
            UPLOAD_EXTENSION
        )));
    }

    info!("Parsing upload '{}' ({} bytes)", filename, bytes.len());
    let options = PipelineOptions::with_trace_records(debug_mode);
    let processed = tokio::task::spawn_blocking(move || process_bytes(&bytes, &options))
        .await
        .map_err(|e| ApiError::Unexpected(e.to_string()))??;

    Ok(Json(ParseResponse {
        success: true,
        filename,
        data: processed.document,
    }))
}
