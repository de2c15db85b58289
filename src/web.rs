//! HTTP boundary of the authorization service.
//!
//! ## Endpoints
//!
//! - `POST /authorize` - Authorization check, `{resource, method, role}` in,
//!   `{authorized}` out
//! - `GET /health` - Health check

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use tower_http::trace::{DefaultOnResponse, TraceLayer};
use tracing::{debug, Level};

use crate::{AuthorizationDecision, AuthorizationRequest, RuleStore};

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: &'static str,
    message: String,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    rules: usize,
}

/// Errors surfaced to HTTP clients.
///
/// A malformed request body is reported as a client error and is never
/// turned into a denied decision.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, message) = match self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, "bad_request", message),
        };

        (status, Json(ErrorResponse { error, message })).into_response()
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::BadRequest(format!("Invalid request body: {e}"))
    }
}

/// Creates the router serving decisions from `store`.
pub fn router(store: Arc<RuleStore>) -> Router {
    let trace =
        TraceLayer::new_for_http().on_response(DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .route("/authorize", post(authorize))
        .route("/health", get(health))
        .layer(trace)
        .with_state(store)
}

async fn authorize(
    State(store): State<Arc<RuleStore>>,
    body: Bytes,
) -> Result<Json<AuthorizationDecision>, ApiError> {
    // the body is decoded whatever the Content-Type header says
    let request: AuthorizationRequest = serde_json::from_slice(&body)?;

    let decision = AuthorizationDecision::from(store.is_authorized(&request));
    debug!(
        resource = request.resource(),
        method = request.method(),
        role = request.role(),
        authorized = decision.authorized,
        "authorization decision"
    );

    Ok(Json(decision))
}

async fn health(State(store): State<Arc<RuleStore>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        rules: store.current().len(),
    })
}
