use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use axum::{middleware::from_fn, response::Json, routing::get, Router};
use tokio::net::TcpListener;
use tower_http::{
    cors::CorsLayer,
    limit::RequestBodyLimitLayer,
    normalize_path::NormalizePath,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
};
use utoipa::openapi::{Info, OpenApi, OpenApiBuilder};

mod config;
pub mod error;
pub mod request_id;
pub mod shutdown;
pub mod web;

pub use config::ApiIngressConfig;
pub use error::{AppError, ErrorBody};

/// Owns the HTTP server: collects module routers and their OpenAPI
/// fragments, wraps them in the shared middleware stack and serves them.
pub struct ApiIngress {
    config: ApiIngressConfig,
    routes: Router,
    mounts: Vec<String>,
    openapi: OpenApi,
}

impl Default for ApiIngress {
    fn default() -> Self {
        Self::new(ApiIngressConfig::default())
    }
}

impl ApiIngress {
    pub fn new(config: ApiIngressConfig) -> Self {
        Self {
            config,
            routes: Router::new(),
            mounts: Vec::new(),
            openapi: OpenApiBuilder::new()
                .info(Info::new("Dishes API", env!("CARGO_PKG_VERSION")))
                .build(),
        }
    }

    /// OpenAPI document assembled from every mounted module.
    pub fn openapi(&self) -> &OpenApi {
        &self.openapi
    }

    /// Mount a module router (and its OpenAPI fragment) under `path`.
    ///
    /// `""` and `"/"` merge the router at the root. Mounting the same path
    /// twice is an error.
    pub fn mount(mut self, path: &str, router: Router, docs: OpenApi) -> Result<Self> {
        let base = normalize_mount(path)?;
        if self.mounts.contains(&base) {
            bail!("route prefix '{base}' is already mounted");
        }

        self.routes = if base.is_empty() {
            self.routes.merge(router)
        } else {
            self.routes.nest(&base, router)
        };
        self.openapi = self
            .openapi
            .nest_with_path_composer(base.clone(), docs, |base, path| {
                if path == "/" && !base.is_empty() {
                    base.to_string()
                } else {
                    format!("{base}{path}")
                }
            });

        tracing::debug!(prefix = %base, "mounted module routes");
        self.mounts.push(base);
        Ok(self)
    }

    /// Build the HTTP router from the mounted routes.
    ///
    /// A trailing slash is ignored: `/dishes/` is served as `/dishes`.
    pub fn build_router(&self) -> Router {
        let mut router = self
            .routes
            .clone()
            .route("/health", get(web::health_check));

        if self.config.enable_docs {
            let doc = Arc::new(self.openapi.clone());
            router = router.route(
                "/openapi.json",
                get(move || {
                    let doc = doc.clone();
                    async move { Json((*doc).clone()) }
                }),
            );
        }

        router = router.fallback(web::not_found);

        // Layers wrap everything added before them, so they go innermost first:
        // BodyLimit -> CORS -> Timeout -> req id into extensions -> Trace -> Propagate -> SetRequestId
        router = router.layer(RequestBodyLimitLayer::new(self.config.body_limit_bytes));

        if self.config.cors_enabled {
            router = router.layer(CorsLayer::permissive());
        }

        if self.config.request_timeout_secs > 0 {
            router = router.layer(TimeoutLayer::new(Duration::from_secs(
                self.config.request_timeout_secs,
            )));
        }

        let x_request_id = request_id::header();
        let router = router
            .layer(from_fn(request_id::push_req_id_to_extensions))
            .layer(request_id::create_trace_layer())
            .layer(PropagateRequestIdLayer::new(x_request_id.clone()))
            .layer(SetRequestIdLayer::new(x_request_id, request_id::MakeReqId));

        // Routing runs before Router::layer middleware, so the path is
        // rewritten by a service wrapped around the finished router
        Router::new().fallback_service(NormalizePath::trim_trailing_slash(router))
    }

    /// Bind `bind_addr` and serve until a termination signal arrives.
    pub async fn serve(self) -> Result<()> {
        let listener = TcpListener::bind(self.config.bind_addr.as_str())
            .await
            .with_context(|| format!("Failed to bind {}", self.config.bind_addr))?;

        self.serve_with_shutdown(listener, async {
            if let Err(e) = shutdown::wait_for_shutdown().await {
                tracing::error!(error = %e, "signal handler failed; shutting down");
            }
        })
        .await
    }

    /// Serve on an already bound listener until `signal` resolves.
    pub async fn serve_with_shutdown<F>(self, listener: TcpListener, signal: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let router = self.build_router();
        let addr = listener.local_addr()?;
        tracing::info!(%addr, mounts = ?self.mounts, "HTTP server listening");

        axum::serve(listener, router)
            .with_graceful_shutdown(signal)
            .await
            .context("HTTP server failed")?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

fn normalize_mount(path: &str) -> Result<String> {
    let trimmed = path.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Ok(String::new());
    }
    if !trimmed.starts_with('/') {
        bail!("mount path must start with '/': {path}");
    }
    if trimmed.contains('{') {
        bail!("mount path must not contain parameters: {path}");
    }
    Ok(trimmed.to_string())
}
