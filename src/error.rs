use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::InferenceError;
use crate::types::PredictResponse;

/// Everything that can go wrong while serving /api/predict. All of it is
/// reported the same way: a 500 carrying the message.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Inference(#[from] InferenceError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let error = self.to_string();
        tracing::error!("predict failed: {}", error);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(PredictResponse::Error { error }),
        )
            .into_response()
    }
}
