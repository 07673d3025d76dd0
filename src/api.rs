//! REST API Server for the Strategy Assistant
//!
//! Exposes greeting, chat turns, risk advice and strategy analysis over HTTP

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use uuid::Uuid;

use crate::assistant::StrategyAssistant;
use crate::models::TurnReply;

/// =============================
/// Request Models
/// =============================

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ChatRequest {
    pub query: String,
    #[serde(default)]
    pub params: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RiskAdviceQuery {
    pub level: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AnalyzeRequest {
    pub params: String,
}

/// =============================
/// Response Wrapper
/// =============================

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse {
    pub success: bool,
    pub data: Option<serde_json::Value>,
    pub error: Option<String>,
    pub timestamp: String,
}

impl ApiResponse {
    pub fn success<T: Serialize>(data: T) -> Self {
        Self {
            success: true,
            data: serde_json::to_value(data).ok(),
            error: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatResponse {
    turn_id: Uuid,
    #[serde(flatten)]
    turn: TurnReply,
}

/// =============================
/// API State
/// =============================

#[derive(Clone)]
pub struct ApiState {
    pub assistant: Arc<StrategyAssistant>,
}

/// =============================
/// Health Endpoint
/// =============================

async fn health(State(state): State<ApiState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "level": state.assistant.level(),
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// =============================
/// Greeting Endpoint
/// =============================

async fn greeting(State(state): State<ApiState>) -> (StatusCode, Json<ApiResponse>) {
    (
        StatusCode::OK,
        Json(ApiResponse::success(serde_json::json!({
            "greeting": state.assistant.greet(),
        }))),
    )
}

/// =============================
/// Chat Endpoint
/// =============================

async fn chat_handler(
    State(state): State<ApiState>,
    Json(req): Json<ChatRequest>,
) -> (StatusCode, Json<ApiResponse>) {
    let turn_id = Uuid::new_v4();
    let turn = state
        .assistant
        .respond_to(&req.query, req.params.as_deref().unwrap_or(""));

    info!(
        turn_id = %turn_id,
        intent = %turn.intent,
        layer = %turn.layer,
        "Answered chat turn"
    );

    (
        StatusCode::OK,
        Json(ApiResponse::success(ChatResponse { turn_id, turn })),
    )
}

/// =============================
/// Risk Advice Endpoint
/// =============================

async fn risk_advice(
    State(state): State<ApiState>,
    Query(query): Query<RiskAdviceQuery>,
) -> (StatusCode, Json<ApiResponse>) {
    let level = state.assistant.resolve_risk_level(query.level.as_deref());

    (
        StatusCode::OK,
        Json(ApiResponse::success(serde_json::json!({
            "level": level,
            "advice": level.advice(),
        }))),
    )
}

/// =============================
/// Strategy Analysis Endpoint
/// =============================

async fn analyze(
    State(state): State<ApiState>,
    Json(req): Json<AnalyzeRequest>,
) -> (StatusCode, Json<ApiResponse>) {
    (
        StatusCode::OK,
        Json(ApiResponse::success(serde_json::json!({
            "reply": state.assistant.analyze_strategy(&req.params),
        }))),
    )
}

/// =============================
/// Router
/// =============================

pub fn create_router(assistant: Arc<StrategyAssistant>) -> Router {
    let state = ApiState { assistant };

    Router::new()
        .route("/health", get(health))
        .route("/api/greeting", get(greeting))
        .route("/api/chat", post(chat_handler))
        .route("/api/risk-advice", get(risk_advice))
        .route("/api/analyze", post(analyze))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// =============================
/// Server Startup
/// =============================

pub async fn start_server(
    assistant: Arc<StrategyAssistant>,
    port: u16,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let router = create_router(assistant);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    info!("API Server listening on http://0.0.0.0:{}", port);
    info!("Local: http://127.0.0.1:{}", port);

    axum::serve(listener, router).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use tower::ServiceExt;

    fn router() -> Router {
        create_router(Arc::new(StrategyAssistant::simple()))
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[test]
    fn test_api_response_error_shape() {
        let json = serde_json::to_value(ApiResponse::error("bad body".into())).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "bad body");
        assert!(json["data"].is_null());
    }

    #[tokio::test]
    async fn test_health() {
        let response = router()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["level"], "simple");
    }

    #[tokio::test]
    async fn test_chat_turn() {
        let response = router()
            .oneshot(post_json(
                "/api/chat",
                serde_json::json!({ "query": "How do I backtest this?" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["data"]["intent"], "backtest");
        assert_eq!(json["data"]["layer"], "generic_strategy");
        assert!(json["data"]["turn_id"].is_string());
    }

    #[tokio::test]
    async fn test_chat_empty_query_is_unknown() {
        for query in ["", "   "] {
            let response = router()
                .oneshot(post_json("/api/chat", serde_json::json!({ "query": query })))
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::OK);
            let json = body_json(response).await;
            assert_eq!(json["success"], true);
            assert_eq!(json["data"]["intent"], "unknown");
            assert_eq!(json["data"]["layer"], "base");
        }
    }

    #[tokio::test]
    async fn test_risk_advice_unknown_level() {
        let response = router()
            .oneshot(
                Request::builder()
                    .uri("/api/risk-advice?level=nonsense")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let json = body_json(response).await;
        assert_eq!(json["data"]["level"], "medium");
        assert_eq!(
            json["data"]["advice"],
            "Balanced approach: 1-2% risk per trade suggested."
        );
    }

    #[tokio::test]
    async fn test_risk_advice_without_level() {
        let response = router()
            .oneshot(Request::builder().uri("/api/risk-advice").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let json = body_json(response).await;
        assert_eq!(json["data"]["level"], "medium");
        assert!(json["data"]["level"].is_string());
    }

    #[tokio::test]
    async fn test_greeting_and_analyze() {
        let response = router()
            .oneshot(Request::builder().uri("/api/greeting").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let json = body_json(response).await;
        let greeting = json["data"]["greeting"].as_str().unwrap().to_string();
        assert!(crate::responses::GREETINGS.contains(&greeting.as_str()));

        let response = router()
            .oneshot(post_json("/api/analyze", serde_json::json!({ "params": "fast=10" })))
            .await
            .unwrap();
        let json = body_json(response).await;
        assert!(json["data"]["reply"].as_str().unwrap().contains("fast=10"));
    }
}
