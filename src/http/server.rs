//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router with the root and health handlers
//! - Wire up middleware (request ID, tracing, CORS, timeout, metrics)
//! - Serve on a bound listener until the shutdown signal fires
//!
//! The catalogue routers (media, genres, movies, people, providers, search,
//! TV) mount onto the same `AppState`.

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::Request,
    http::Request as HttpRequest,
    middleware::{self, Next},
    response::Response,
    routing::get,
    Router,
};
use sqlx::PgPool;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::cache::CacheHandle;
use crate::config::Settings;
use crate::http::cors::{cors_layer, CorsError};
use crate::http::handlers::{health, root};
use crate::http::request::{propagate_request_id_layer, set_request_id_layer, RequestIdExt};
use crate::observability::metrics;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub db: PgPool,
    pub cache: Arc<CacheHandle>,
}

/// HTTP server for the API.
pub struct HttpServer {
    router: Router,
    settings: Arc<Settings>,
}

impl HttpServer {
    pub fn new(state: AppState) -> Result<Self, CorsError> {
        let settings = state.settings.clone();
        let router = build_router(state)?;
        Ok(Self { router, settings })
    }

    /// Run the server until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            environment = %self.settings.app_environment,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}

/// Build the Axum router with all middleware layers.
#[allow(deprecated)]
pub fn build_router(state: AppState) -> Result<Router, CorsError> {
    let cors = cors_layer(&state.settings)?;
    let timeout = Duration::from_secs(state.settings.listener.request_timeout_secs);

    let router = Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .with_state(state)
        .layer(middleware::from_fn(track_requests))
        .layer(TimeoutLayer::new(timeout))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &HttpRequest<Body>| {
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    path = %request.uri().path(),
                    request_id = %request.request_id()
                )
            }),
        )
        .layer(propagate_request_id_layer())
        .layer(set_request_id_layer());

    Ok(router)
}

async fn track_requests(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();
    let response = next.run(request).await;
    metrics::record_request(&method, response.status().as_u16(), start);
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CacheConfig, DatabaseConfig, Environment};
    use crate::http::handlers::WELCOME_MESSAGE;
    use crate::http::request::X_REQUEST_ID;
    use axum::http::{header, Method, StatusCode};
    use tower::ServiceExt;

    fn state(environment: Environment) -> AppState {
        let mut settings = Settings::default();
        settings.app_environment = environment;
        settings.streamchaser_url = "streamchaser.tv".to_string();

        AppState {
            settings: Arc::new(settings),
            db: crate::db::connect_lazy(&DatabaseConfig::default()).unwrap(),
            cache: Arc::new(CacheHandle::open(&CacheConfig::default()).unwrap()),
        }
    }

    async fn send_get(router: Router, uri: &str, origin: Option<&str>) -> Response {
        let mut request = HttpRequest::builder().method(Method::GET).uri(uri);
        if let Some(origin) = origin {
            request = request.header(header::ORIGIN, origin);
        }
        router.oneshot(request.body(Body::empty()).unwrap()).await.unwrap()
    }

    fn allowed_origin(response: &Response) -> Option<String> {
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .map(|v| v.to_str().unwrap().to_string())
    }

    #[tokio::test]
    async fn test_root_welcome_in_production() {
        let router = build_router(state(Environment::Production)).unwrap();
        let response = send_get(router, "/", None).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json, serde_json::json!({ "data": WELCOME_MESSAGE }));
    }

    #[tokio::test]
    async fn test_root_redirects_to_docs_in_development() {
        let router = build_router(state(Environment::Development)).unwrap();
        let response = send_get(router, "/", None).await;
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/docs");
    }

    #[tokio::test]
    async fn test_any_origin_allowed_outside_production() {
        let router = build_router(state(Environment::Development)).unwrap();
        let response = send_get(router, "/health", Some("http://localhost:3000")).await;
        assert_eq!(allowed_origin(&response).as_deref(), Some("http://localhost:3000"));
        assert_eq!(
            response.headers().get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS).unwrap(),
            "true"
        );
    }

    #[tokio::test]
    async fn test_production_origin_policy() {
        let router = build_router(state(Environment::Production)).unwrap();

        for origin in [
            "https://streamchaser.tv",
            "http://streamchaser.tv",
            "https://streamchaser-git-main.vercel.app",
        ] {
            let response = send_get(router.clone(), "/health", Some(origin)).await;
            assert_eq!(allowed_origin(&response).as_deref(), Some(origin));
        }

        let response = send_get(router, "/health", Some("https://evil.example")).await;
        assert_eq!(allowed_origin(&response), None);
    }

    #[tokio::test]
    async fn test_request_id_set_and_echoed() {
        let router = build_router(state(Environment::Development)).unwrap();

        let response = send_get(router.clone(), "/health", None).await;
        let generated = response.headers().get(&X_REQUEST_ID).unwrap().to_str().unwrap();
        assert!(uuid::Uuid::parse_str(generated).is_ok());

        let request = HttpRequest::builder()
            .uri("/health")
            .header("x-request-id", "client-supplied")
            .body(Body::empty())
            .unwrap();
        let response = router.oneshot(request).await.unwrap();
        assert_eq!(response.headers().get(&X_REQUEST_ID).unwrap(), "client-supplied");
    }

    #[tokio::test]
    async fn test_health_reports_cache_state() {
        let state = state(Environment::Testing);
        let cache = state.cache.clone();
        let router = build_router(state).unwrap();

        cache.close().await;
        let response = send_get(router, "/health", None).await;
        let body = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["environment"], "testing");
        assert_eq!(json["cache"], "closed");
    }
}
