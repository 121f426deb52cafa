use super::common::*;
use axum::http::{header::CONTENT_TYPE, StatusCode};
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt;

use crate::intelligence::router::intelligence_router;
use crate::intelligence::service::IntelligenceService;

fn post_json(path: &str, body: serde_json::Value) -> axum::http::Request<axum::body::Body> {
    axum::http::Request::post(path)
        .header(CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from(
            serde_json::to_vec(&body).expect("serialize body"),
        ))
        .expect("request builds")
}

#[tokio::test]
async fn select_route_returns_component_and_expansion() {
    let app = intelligence_router(Arc::new(IntelligenceService::default()));

    let response = app
        .oneshot(post_json(
            "/api/v1/intelligence/select",
            json!({
                "intent": "portfolio_overview",
                "surface": "inline",
                "portfolio": portfolio(),
                "includeExpansion": true
            }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["resolution"]["kind"], "component");
    assert_eq!(
        body["resolution"]["config"]["component"],
        "RiskDistributionWidget"
    );
    assert_eq!(body["resolution"]["config"]["expandsTo"], "PortfolioDashboard");
    assert_eq!(body["expansion"]["surface"], "panel");
    assert_eq!(body["expansion"]["config"]["component"], "PortfolioDashboard");
}

#[tokio::test]
async fn select_route_reports_placeholder_for_unknown_widgets() {
    let app = intelligence_router(Arc::new(IntelligenceService::default()));

    let response = app
        .oneshot(post_json(
            "/api/v1/intelligence/select",
            json!({
                "intent": "market_context",
                "surface": "compact",
                "widget": { "type": "sankey_flow", "data": { "nodes": [] } }
            }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["resolution"]["kind"], "placeholder");
    assert_eq!(body["resolution"]["typeTag"], "sankey_flow");
    assert!(body.get("expansion").is_none());
}

#[tokio::test]
async fn select_route_rejects_unknown_intents() {
    let app = intelligence_router(Arc::new(IntelligenceService::default()));

    let response = app
        .oneshot(post_json(
            "/api/v1/intelligence/select",
            json!({ "intent": "small_talk", "surface": "inline" }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn confidence_route_classifies_sources() {
    let app = intelligence_router(Arc::new(IntelligenceService::default()));

    let response = app
        .oneshot(post_json(
            "/api/v1/intelligence/confidence",
            json!({
                "sources": { "internal": proprietary(3), "web": web(2) },
                "detectedCategory": "Steel",
                "managedCategories": ["Steel (Hot Rolled Coil)", "Copper"]
            }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["level"], "high");
    assert_eq!(body["isManagedCategory"], true);
    assert_eq!(body["beroeSourceCount"], 3);
    assert_eq!(body["webSourceCount"], 2);
    assert_eq!(body["showExpandToWeb"], false);
}
