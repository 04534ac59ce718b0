use crate::{error::ApiError, state::AppState};
use axum::{
    Json, Router,
    body::Bytes,
    extract::{DefaultBodyLimit, Multipart, State, multipart::MultipartRejection},
    routing::{get, post},
};
use inference::Classification;
use serde::Serialize;
use std::time::Instant;
use tower_http::cors::CorsLayer;

const HEALTH_STATUS: &str = "Backend running 🚀";
const UPLOAD_FIELD: &str = "file";

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub prediction: &'static str,
    /// Percentage in [0, 100], two decimals.
    pub confidence: f64,
}

impl From<Classification> for PredictResponse {
    fn from(classification: Classification) -> Self {
        Self {
            prediction: classification.label,
            confidence: classification.confidence_percent(),
        }
    }
}

struct Upload {
    filename: String,
    bytes: Bytes,
}

pub fn router(state: AppState, body_limit_bytes: usize) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/predict", post(predict))
        .layer(DefaultBodyLimit::max(body_limit_bytes))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: HEALTH_STATUS,
    })
}

#[tracing::instrument(skip_all)]
async fn predict(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<PredictResponse>, ApiError> {
    let multipart = multipart.inspect_err(|e| {
        tracing::warn!(error = %e, "Rejected request body");
    })?;

    let upload = read_upload(multipart).await.inspect_err(|e| {
        tracing::warn!(error = %e, "Rejected upload");
    })?;

    tracing::debug!(
        filename = %upload.filename,
        bytes = upload.bytes.len(),
        "Received upload"
    );

    let classifier = state.classifier.clone();
    let start = Instant::now();
    let result = tokio::task::spawn_blocking(move || classifier.classify(&upload.bytes)).await;

    match result {
        Ok(Ok(classification)) => {
            tracing::info!(
                "Prediction: {} ({:.4})",
                classification.label,
                classification.score
            );
            state
                .metrics
                .record_success(classification.label, start.elapsed());
            Ok(Json(classification.into()))
        }
        Ok(Err(e)) => {
            tracing::error!(error = %e, "Prediction error");
            state.metrics.record_failure();
            Err(ApiError::PredictionFailed)
        }
        Err(e) => {
            tracing::error!(
                error = %e,
                "Prediction task failed (task panicked or cancelled)"
            );
            state.metrics.record_failure();
            Err(ApiError::PredictionFailed)
        }
    }
}

/// Take the `file` field; a missing field or empty filename means nothing was uploaded.
async fn read_upload(mut multipart: Multipart) -> Result<Upload, ApiError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        if filename.is_empty() {
            return Err(ApiError::MissingFile);
        }

        let bytes = field.bytes().await?;
        return Ok(Upload { filename, bytes });
    }

    Err(ApiError::MissingFile)
}
