use axum::{
    Json,
    extract::multipart::{MultipartError, MultipartRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// Errors surfaced to HTTP clients. Anything that goes wrong after the upload
/// has been read collapses into `PredictionFailed`.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("No file uploaded")]
    MissingFile,

    #[error("{}", .0.body_text())]
    InvalidForm(#[from] MultipartRejection),

    #[error("{}", .0.body_text())]
    Upload(#[from] MultipartError),

    #[error("Prediction failed")]
    PredictionFailed,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub detail: String,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingFile => StatusCode::BAD_REQUEST,
            ApiError::InvalidForm(rejection) => rejection.status(),
            ApiError::Upload(err) => err.status(),
            ApiError::PredictionFailed => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorBody {
            detail: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn render(err: ApiError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_missing_file_is_client_error() {
        let (status, body) = render(ApiError::MissingFile).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, serde_json::json!({ "detail": "No file uploaded" }));
    }

    #[tokio::test]
    async fn test_prediction_failure_hides_cause() {
        let (status, body) = render(ApiError::PredictionFailed).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, serde_json::json!({ "detail": "Prediction failed" }));
    }
}
