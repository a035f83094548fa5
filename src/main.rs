//! Teams Backend
//!
//! A REST backend for team-member profiles: SQLite persistence, a
//! template-driven block renderer, and a public taxonomy-terms endpoint.

mod api;
mod auth;
mod blocks;
mod config;
mod db;
mod errors;
mod models;
mod render;

use std::sync::Arc;

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use blocks::BlockDispatch;
use config::Config;
use db::Repository;
use render::{PatternRegistry, TemplateRenderer};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<Repository>,
    pub blocks: Arc<BlockDispatch>,
    pub patterns: Arc<PatternRegistry>,
    pub config: Arc<Config>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env();

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Teams Backend");
    tracing::info!("Database path: {:?}", config.db_path);
    tracing::info!("Template directory: {:?}", config.template_dir);
    tracing::info!("Bind address: {}", config.bind_addr);

    // Warn if PSK is not configured
    if config.api_psk.is_none() {
        tracing::warn!("No API PSK configured (TEAMS_API_PSK). The editor surface is open!");
    }

    // Initialize database
    let pool = db::init_database(&config.db_path).await?;
    let repo = Arc::new(Repository::new(pool));

    // Initialize the renderer; a missing template directory is fatal here
    let renderer = Arc::new(TemplateRenderer::new(
        &config.template_dir,
        config.placeholder_image_url.clone(),
    )?);
    let patterns = Arc::new(PatternRegistry::load(
        &config.template_dir,
        &config.placeholder_image_url,
    )?);
    let blocks = Arc::new(BlockDispatch::with_template_renderer(renderer));

    // Create application state
    let state = AppState {
        repo,
        blocks,
        patterns,
        config: Arc::new(config.clone()),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Clone PSK for the capability layer
    let psk = state.config.api_psk.clone();

    // Editor surface routes, capability-gated
    let editor_routes = Router::new()
        // Members
        .route("/fields", get(api::field_schema))
        .route("/members", get(api::list_members))
        .route("/members", post(api::create_member))
        .route("/members/{id}", get(api::get_member))
        .route("/members/{id}", delete(api::delete_member))
        .route("/members/{id}/meta", get(api::get_member_meta))
        .route("/members/{id}/meta/{field}", put(api::write_member_field))
        .route("/members/{id}/terms", get(api::member_terms))
        .route("/members/{id}/terms", put(api::assign_member_terms))
        // Terms
        .route("/terms", get(api::list_terms))
        .route("/terms", post(api::create_term))
        .route("/terms/{id}", delete(api::delete_term))
        // Templates and patterns
        .route("/templates", get(api::get_template_catalog))
        .route("/templates/{id}", get(api::get_template_by_id))
        .route("/patterns", get(api::list_patterns))
        // Block rendering
        .route("/render", post(api::render_blocks))
        // Apply the edit-capability middleware
        .layer(middleware::from_fn(move |req, next| {
            auth::edit_capability_layer(psk.clone(), req, next)
        }));

    // Public read routes (no auth required)
    let public_routes = Router::new()
        .route("/wp-team-members/v1", get(api::public_terms))
        .route("/wp-team-members/v1/", get(api::public_terms))
        .route("/health", get(health_check));

    let mut app = Router::new();

    // The editor surface only exists on authorized installations
    if state.config.install_authorized {
        app = app.nest("/api", editor_routes);
    } else {
        tracing::warn!("Installation not authorized; editor surface disabled");
    }

    app.merge(public_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
