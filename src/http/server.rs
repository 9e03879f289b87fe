//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with the dispatch handler
//! - Wire up middleware (request ID, tracing, timeout, limits, headers)
//! - Build the CDN proxy when enabled
//! - Dispatch each request to its routing target
//! - Record per-request metrics
//! - Serve on a bound listener until shutdown

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::body::Body;
use axum::extract::State;
use axum::http::Request;
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::compression::CompressionLayer;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::cdn::CdnProxy;
use crate::config::HostConfig;
use crate::http::handlers;
use crate::http::request::{MakeRequestUuidV4, RequestIdExt};
use crate::http::response::not_found;
use crate::lifecycle::shutdown;
use crate::lifecycle::SiteHost;
use crate::observability::metrics;
use crate::render::{MiniJinjaRenderer, TemplateRenderer};
use crate::routing::{SiteRouter, Target};
use crate::security;
use crate::sites::PageResolver;

/// Application state injected into handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub router: Arc<SiteRouter>,
    pub pages: Arc<PageResolver>,
    pub renderer: Arc<dyn TemplateRenderer>,
    /// `None` when the proxy is disabled or could not be built.
    pub cdn: Option<Arc<CdnProxy>>,
}

/// HTTP server for the site host.
pub struct HttpServer {
    router: Router,
    config: HostConfig,
    cdn: Option<Arc<CdnProxy>>,
}

impl HttpServer {
    /// Server rendering with the default template engine.
    pub fn new(config: HostConfig, host: SiteHost) -> Self {
        Self::with_renderer(config, host, Arc::new(MiniJinjaRenderer::new()))
    }

    pub fn with_renderer(
        config: HostConfig,
        host: SiteHost,
        renderer: Arc<dyn TemplateRenderer>,
    ) -> Self {
        let cdn = Self::build_cdn(&config, &host);
        let state = AppState {
            router: host.router,
            pages: host.pages,
            renderer,
            cdn: cdn.clone(),
        };
        let router = Self::build_router(&config, state);
        Self {
            router,
            config,
            cdn,
        }
    }

    fn build_cdn(config: &HostConfig, host: &SiteHost) -> Option<Arc<CdnProxy>> {
        if !config.cdn.enabled {
            tracing::info!("CDN proxy disabled");
            return None;
        }
        match CdnProxy::new(&config.cdn, host.store.root()) {
            Ok(proxy) => {
                tracing::info!(cache = %proxy.cache().root().display(), "CDN proxy enabled");
                Some(Arc::new(proxy))
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to build CDN proxy; /cdn/ will be 404");
                None
            }
        }
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// Layers added last run first: request ID, then tracing, then limits.
    #[allow(deprecated)]
    fn build_router(config: &HostConfig, state: AppState) -> Router {
        let mut router = Router::new()
            .route("/", get(dispatch))
            .route("/{*path}", get(dispatch))
            .with_state(state);

        if config.security.compression {
            router = router.layer(CompressionLayer::new());
        }
        if config.security.enable_headers {
            router = security::headers::apply(router);
        }

        let router = router.layer(TimeoutLayer::new(Duration::from_secs(
            config.timeouts.request_secs,
        )));
        let router = security::limits::apply(
            router,
            config.security.max_body_size,
            config.listener.max_connections,
        );

        router
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http().make_span_with(|req: &Request<Body>| {
                tracing::info_span!(
                    "request",
                    method = %req.method(),
                    path = %req.uri().path(),
                    request_id = req.request_id().unwrap_or("-"),
                )
            }))
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV4))
    }

    /// The fully layered router, for in-process use.
    pub fn into_router(self) -> Router {
        self.router
    }

    pub fn config(&self) -> &HostConfig {
        &self.config
    }

    /// The CDN proxy, for the startup prewarm.
    pub fn cdn(&self) -> Option<Arc<CdnProxy>> {
        self.cdn.clone()
    }

    /// Serve on `listener` until `shutdown_rx` fires, then drain in-flight
    /// requests.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown_rx: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown::wait(shutdown_rx))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Single entry point: route, then hand off to the target's handler.
async fn dispatch(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start = Instant::now();
    let target = state
        .router
        .route(request.request_host(), request.uri().path());
    let route = target.kind();

    tracing::debug!(
        host = request.request_host().unwrap_or(""),
        path = %request.uri().path(),
        route,
        "Dispatching request"
    );

    let response = match target {
        Target::Home => handlers::home(&state).await,
        Target::Page {
            site,
            page,
            base_path,
        } => handlers::page(&state, site, page, base_path).await,
        Target::ConfigApi { site } => handlers::config_api(&state, site).await,
        Target::Static { site, asset } => {
            handlers::static_asset(&state, site, asset, request).await
        }
        Target::Cdn { path } => handlers::cdn(&state, path).await,
        Target::NotFound => not_found(),
    };

    metrics::record_request(route, response.status().as_u16(), start);
    response
}
