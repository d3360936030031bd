//! # HTTP Server
//!
//! Binds the student routes, CORS layer and shared state into a
//! runnable axum server.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::body::Body;
use axum::extract::Request;
use axum::http::{header, Method, StatusCode};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

use crate::observability::{ChangeNotifier, Logger};
use crate::store::RecordStore;

use super::config::HttpServerConfig;
use super::student_routes::{student_routes, StudentState};

/// HTTP server for the student record service
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with default configuration
    pub fn new() -> Self {
        Self::with_config(HttpServerConfig::default())
    }

    /// Create a new HTTP server with custom configuration
    pub fn with_config(config: HttpServerConfig) -> Self {
        let router = Self::build_router(&config, ChangeNotifier::default());
        Self { config, router }
    }

    /// Create a server whose mutation events go to the given notifier
    pub fn with_notifier(config: HttpServerConfig, notifier: ChangeNotifier) -> Self {
        let router = Self::build_router(&config, notifier);
        Self { config, router }
    }

    /// Build the router with state and CORS middleware
    fn build_router(config: &HttpServerConfig, notifier: ChangeNotifier) -> Router {
        let store = RecordStore::new(config.data_file.clone());
        let state = Arc::new(StudentState::new(store, notifier));

        // Permissive by default; restrict origins only when configured.
        let cors = if config.cors_origins.is_empty() {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers([header::CONTENT_TYPE])
        } else {
            use tower_http::cors::AllowOrigin;
            let origins: Vec<_> = config
                .cors_origins
                .iter()
                .filter_map(|s| s.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers([header::CONTENT_TYPE])
        };

        student_routes(state)
            .layer(cors)
            .layer(middleware::from_fn(options_no_content))
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Start the HTTP server (async)
    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr: SocketAddr = self
            .config
            .socket_addr()
            .parse()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, format!("{}", e)))?;

        Logger::info(
            "SERVER_START",
            &[
                ("addr", &addr.to_string()),
                ("data_file", &self.config.data_file.display().to_string()),
            ],
        );

        let listener = TcpListener::bind(addr).await?;
        axum::serve(listener, self.router).await?;

        Ok(())
    }
}

/// Answer every `OPTIONS` request with 204 and no body.
///
/// Sits outside the CORS layer so preflight answers are rewritten too;
/// the CORS headers already set on the response are kept.
async fn options_no_content(request: Request, next: Next) -> Response {
    let is_options = request.method() == Method::OPTIONS;
    let response = next.run(request).await;
    if !is_options {
        return response;
    }

    let (mut parts, _) = response.into_parts();
    parts.status = StatusCode::NO_CONTENT;
    parts.headers.remove(header::CONTENT_TYPE);
    parts.headers.remove(header::CONTENT_LENGTH);
    Response::from_parts(parts, Body::empty())
}

impl Default for HttpServer {
    fn default() -> Self {
        Self::new()
    }
}
