mod config;
mod error;
mod models;
mod routes;
mod services;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use config::Config;
use routes::{analyze_handler, health_handler};
use services::{AnalyzerService, FetcherService, GeminiClient};

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub analyzer: Arc<AnalyzerService>,
    pub fetcher: Arc<FetcherService>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug"));
    if config.log_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer())
            .with(filter)
            .init();
    }

    info!("Starting Landing Lens v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration loaded");
    info!("  Port: {}", config.api_port);
    info!("  Model: {}", config.gemini_model);
    if config.gemini_api_key.is_none() {
        info!("  GEMINI_API_KEY not set, analyses will return basic metrics only");
    }

    let model = Arc::new(GeminiClient::new(&config)?);
    let analyzer = Arc::new(AnalyzerService::new(model));
    info!("Analyzer service initialized");

    let fetcher = Arc::new(FetcherService::new(&config)?);
    info!("Fetcher service initialized");

    let state = AppState {
        config: config.clone(),
        analyzer,
        fetcher,
    };

    let app = build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.api_port));
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

fn build_router(state: AppState) -> Router {
    let max_body_bytes = state.config.max_body_bytes;

    Router::new()
        .route("/health", get(health_handler))
        .route("/api/analyze", post(analyze_handler))
        .with_state(state)
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        },
        _ = terminate => {
            info!("Received terminate signal, initiating shutdown...");
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AppError, Result};
    use crate::services::ModelClient;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    struct StubModel(Option<&'static str>);

    #[async_trait]
    impl ModelClient for StubModel {
        async fn invoke(&self, _prompt: &str) -> Result<String> {
            self.0
                .map(str::to_string)
                .ok_or_else(|| AppError::Configuration("GEMINI_API_KEY is not set".to_string()))
        }
    }

    fn app(reply: Option<&'static str>) -> Router {
        let config = Config::default();
        let state = AppState {
            analyzer: Arc::new(AnalyzerService::new(Arc::new(StubModel(reply)))),
            fetcher: Arc::new(FetcherService::new(&config).unwrap()),
            config,
        };
        build_router(state)
    }

    async fn post_analyze(app: Router, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri("/api/analyze")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    async fn send_raw(content_type: Option<&str>, body: &'static str) -> (StatusCode, Value) {
        let mut builder = Request::builder().method("POST").uri("/api/analyze");
        if let Some(content_type) = content_type {
            builder = builder.header("content-type", content_type);
        }

        let response = app(None)
            .oneshot(builder.body(Body::from(body)).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn malformed_json_gets_message_body() {
        let (status, body) = send_raw(Some("application/json"), "{\"html\": ").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"].as_str().unwrap().starts_with("Invalid request body"));
    }

    #[tokio::test]
    async fn wrong_field_type_gets_message_body() {
        let (status, body) = send_raw(Some("application/json"), r#"{"html": 42}"#).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["message"].is_string());
    }

    #[tokio::test]
    async fn missing_content_type_gets_message_body() {
        let (status, body) = send_raw(None, r#"{"html": "<p>x</p>"}"#).await;

        assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert!(body["message"].is_string());
    }

    #[tokio::test]
    async fn empty_request_is_bad_request() {
        let (status, body) = post_analyze(app(None), json!({})).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"message": "URL or HTML is required"}));
    }

    #[tokio::test]
    async fn html_analysis_reports_local_metrics() {
        let reply = r#"{"overallScore": 68, "suggestions": [
            {"title": "Explain the offer", "category": "copy", "description": "One heading is thin.", "recommendation": "Add a subheading."}
        ]}"#;
        let html = "<html><body><h1>Hi</h1><p>word word</p><a href='#'>Click</a></body></html>";

        let (status, body) = post_analyze(app(Some(reply)), json!({"html": html})).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["overallScore"], 68);
        assert_eq!(body["suggestions"][0]["category"], "Copy");
        assert_eq!(body["metrics"]["Headings"], "1");
        assert_eq!(body["metrics"]["Paragraphs"], "1");
        assert_eq!(body["metrics"]["Links"], "1");
        // "Hi", "word", "word" plus the link text "Click".
        assert_eq!(body["metrics"]["Word Count"], "4");
        assert_eq!(body["metrics"]["Reading Time"], "1 min");
    }

    #[tokio::test]
    async fn model_failure_still_returns_ok() {
        let (status, body) =
            post_analyze(app(None), json!({"html": "<p>Hello there</p>"})).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["overallScore"], 50);
        assert_eq!(body["suggestions"].as_array().unwrap().len(), 1);
        assert_eq!(body["suggestions"][0]["category"], "Copy");
        assert_eq!(body["metrics"]["Word Count"], "2");
    }

    #[tokio::test]
    async fn private_url_is_refused_before_fetching() {
        let (status, body) =
            post_analyze(app(None), json!({"url": "http://127.0.0.1:9/", "html": "<p>x</p>"}))
                .await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert!(body["message"].as_str().unwrap().contains("127.0.0.1"));
    }

    #[tokio::test]
    async fn health_reports_model_configuration() {
        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();

        let response = app(None).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["model_configured"], false);
    }
}
