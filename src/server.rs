use crate::config::Config;
use crate::contact;
use crate::content::{ContentProvider, JsonContentProvider};
use crate::i18n::LocaleRegistry;
use crate::pages;
use crate::routing::{locale_middleware, ExclusionRules};
use anyhow::{Context, Result};
use axum::routing::{get, post};
use axum::{middleware, Json, Router};
use serde_json::json;
use std::sync::Arc;
use tower::Layer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

/// Shared, read-only application state built once at startup.
pub struct AppState {
    pub config: Config,
    pub registry: LocaleRegistry,
    pub exclusions: ExclusionRules,
    pub content: Arc<dyn ContentProvider>,
    pub http: reqwest::Client,
}

impl AppState {
    pub fn new(
        config: Config,
        registry: LocaleRegistry,
        content: Arc<dyn ContentProvider>,
    ) -> Self {
        Self {
            config,
            registry,
            exclusions: ExclusionRules::default(),
            content,
            http: reqwest::Client::new(),
        }
    }

    /// Build state from configuration, loading content from `config.content_path`.
    pub fn load(config: Config) -> Result<Self> {
        let registry = LocaleRegistry::builtin();
        let content = JsonContentProvider::from_path(&config.content_path, &registry)
            .context("Failed to load site content")?;

        Ok(Self::new(config, registry, Arc::new(content)))
    }
}

/// Build the application.
///
/// The locale middleware wraps the whole page router rather than being a
/// route layer, so that its URI rewrite happens before routing.
pub fn build_app(state: Arc<AppState>) -> Router {
    let routes = Router::new()
        .route("/api/health", get(health))
        .route("/web-api/contact", post(contact::handle_contact))
        .route("/:locale", get(pages::home))
        .route("/:locale/projects", get(pages::projects))
        .route("/:locale/projects/:slug", get(pages::project_detail))
        .with_state(Arc::clone(&state));

    let localized = middleware::from_fn_with_state(state, locale_middleware).layer(routes);

    Router::new()
        .fallback_service(localized)
        .layer(TraceLayer::new_for_http())
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

/// Bind and serve until Ctrl+C.
pub async fn run(state: AppState) -> Result<()> {
    let addr = format!("0.0.0.0:{}", state.config.port);
    let app = build_app(Arc::new(state));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context(format!("Failed to bind {}", addr))?;
    info!("✓ Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
    }
}
