//! HTTP state service for the square collection.

pub mod config;
mod handlers;

use std::{sync::Arc, time::Instant};

use axum::{
    Router,
    body::Body,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method, Request},
    middleware::{Next, from_fn},
    response::Response,
    routing::{get, post},
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::Instrument;

use crate::{
    foundation::error::{BlockPartyError, BlockPartyResult},
    store::FileStore,
};

pub use config::ServerConfig;

/// Shared handler state.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Backing state file.
    pub store: Arc<FileStore>,
    /// Settings the router was built with.
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Bundle a store with its configuration.
    pub fn new(store: Arc<FileStore>, config: ServerConfig) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }
}

/// Collection endpoints plus `/healthz`, with CORS, body limit and request tracing.
pub fn build_router(state: AppState) -> Router {
    let mut router = Router::new()
        .route("/healthz", get(handlers::healthz))
        .route(
            "/collection",
            get(handlers::get_collection)
                .post(handlers::save_collection)
                .delete(handlers::clear_collection),
        )
        .route("/collection/add", post(handlers::add_square))
        .layer(DefaultBodyLimit::max(state.config.max_body_bytes))
        .layer(from_fn(request_tracing));

    if let Some(cors) = cors_layer(&state.config.cors_origins) {
        router = router.layer(cors);
    }
    router.with_state(state)
}

fn cors_layer(origins: &[String]) -> Option<CorsLayer> {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!(origin = %o, "ignoring unparseable CORS origin");
                None
            }
        })
        .collect();
    if allowed.is_empty() {
        return None;
    }
    Some(
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(allowed))
            .allow_methods([Method::GET, Method::POST, Method::DELETE])
            .allow_headers(Any),
    )
}

async fn request_tracing(request: Request<Body>, next: Next) -> Response {
    let span = tracing::info_span!(
        "http.request",
        method = %request.method(),
        route = %request.uri().path(),
    );
    let started = Instant::now();
    let response = next.run(request).instrument(span.clone()).await;
    span.in_scope(|| {
        tracing::info!(
            status = response.status().as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "request finished"
        );
    });
    response
}

/// Open the state file, bind, and serve until Ctrl-C or SIGTERM.
pub async fn serve(config: ServerConfig) -> BlockPartyResult<()> {
    let store = Arc::new(FileStore::open(&config.state_file).await?);
    let listener = tokio::net::TcpListener::bind(&config.bind)
        .await
        .map_err(|e| BlockPartyError::Other(anyhow::anyhow!("bind {}: {e}", config.bind)))?;
    let local = listener
        .local_addr()
        .map_err(|e| BlockPartyError::Other(e.into()))?;
    tracing::info!(
        addr = %local,
        state_file = %config.state_file.display(),
        "blockparty state service listening"
    );

    let app = build_router(AppState::new(store, config));
    axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_shutdown_signal())
        .await
        .map_err(|e| BlockPartyError::Other(e.into()))?;
    tracing::info!("blockparty state service stopped");
    Ok(())
}

async fn wait_for_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = sigterm.recv() => {}
                    _ = tokio::signal::ctrl_c() => {}
                }
            }
            Err(e) => {
                tracing::warn!("SIGTERM handler unavailable: {e}");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
