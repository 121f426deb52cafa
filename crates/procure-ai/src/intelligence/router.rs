use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};

use super::confidence::ConfidenceDescriptor;
use super::service::{ConfidenceRequest, IntelligenceService, SelectionRequest, SelectionResponse};

/// Router builder exposing the selection and confidence decisions over HTTP.
pub fn intelligence_router(service: Arc<IntelligenceService>) -> Router {
    Router::new()
        .route("/api/v1/intelligence/select", post(select_handler))
        .route("/api/v1/intelligence/confidence", post(confidence_handler))
        .with_state(service)
}

pub(crate) async fn select_handler(
    State(service): State<Arc<IntelligenceService>>,
    Json(request): Json<SelectionRequest>,
) -> Json<SelectionResponse> {
    Json(service.select(request))
}

pub(crate) async fn confidence_handler(
    State(service): State<Arc<IntelligenceService>>,
    Json(request): Json<ConfidenceRequest>,
) -> Json<ConfidenceDescriptor> {
    Json(service.confidence(request))
}
