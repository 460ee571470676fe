use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderName, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};

use crate::error::ApiError;
use crate::model::InferenceClient;
use crate::prompt::{build_prompt, FALLBACK_PLAYCALL, MODEL_ID};
use crate::types::{GameState, HealthResponse, PredictResponse};

pub const ALLOW_ORIGIN: &str = "*";
pub const ALLOW_METHODS: &str = "POST, GET, OPTIONS";
pub const ALLOW_HEADERS: &str = "Content-Type";

// ---------- Server state ----------

#[derive(Clone)]
pub struct AppState {
    pub client: Arc<dyn InferenceClient>,
}

impl AppState {
    pub fn new(client: Arc<dyn InferenceClient>) -> Self {
        Self { client }
    }
}

// ---------- Handlers ----------

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { ok: true })
}

async fn predict(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<PredictResponse>, ApiError> {
    let playcall = predict_playcall(state.client.as_ref(), &body).await?;
    Ok(Json(PredictResponse::Playcall { playcall }))
}

/// Parse the posted situation, prompt the model, and return its text.
pub async fn predict_playcall(
    client: &dyn InferenceClient,
    body: &[u8],
) -> Result<String, ApiError> {
    let gs = GameState::from_json(body)?;
    let prompt = build_prompt(&gs);
    tracing::debug!("prompt:\n{}", prompt);

    let out = client.run(MODEL_ID, &prompt).await?;
    let playcall = out.response.unwrap_or_else(|| {
        tracing::warn!("model returned no text; using fallback");
        FALLBACK_PLAYCALL.to_string()
    });

    tracing::info!("playcall: {}", playcall);
    Ok(playcall)
}

async fn preflight() -> StatusCode {
    StatusCode::NO_CONTENT
}

async fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "Not found").into_response()
}

// Unmatched paths: preflight still succeeds everywhere.
async fn fallback(method: Method) -> Response {
    if method == Method::OPTIONS {
        preflight().await.into_response()
    } else {
        not_found().await
    }
}

// ---------- Router ----------

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/health",
            get(health).options(preflight).fallback(not_found),
        )
        .route(
            "/api/predict",
            post(predict).options(preflight).fallback(not_found),
        )
        .fallback(fallback)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors_header(header::ACCESS_CONTROL_ALLOW_ORIGIN, ALLOW_ORIGIN))
        .layer(cors_header(header::ACCESS_CONTROL_ALLOW_METHODS, ALLOW_METHODS))
        .layer(cors_header(header::ACCESS_CONTROL_ALLOW_HEADERS, ALLOW_HEADERS))
}

fn cors_header(name: HeaderName, value: &'static str) -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::overriding(name, HeaderValue::from_static(value))
}
