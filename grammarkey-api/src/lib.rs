//! grammarkey HTTP service.
//!
//! Routes (all JSON):
//!   GET  /                        - service banner
//!   GET  /api/health              - liveness
//!   GET  /api/cfg/modes           - grammar mode catalog
//!   POST /api/cfg/generate        - derive a key with its parse steps
//!   POST /api/cfg/tree            - lay out parse steps as a positioned tree + SVG
//!   POST /api/entropy/calculate   - Shannon entropy of a string
//!   POST /api/aes/encrypt         - seal text under a passphrase
//!   POST /api/aes/decrypt         - open sealed text

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use grammarkey::KdfParams;

pub mod config;
pub mod error;
pub mod routes;

pub use config::{Config, CorsOrigins, LogFormat};
pub use error::{ApiError, ApiJson};

pub struct AppState {
    pub kdf: KdfParams,
    pub max_key_length: usize,
}

pub type Shared = Arc<AppState>;

impl AppState {
    pub fn from_config(cfg: &Config) -> Self {
        Self { kdf: cfg.kdf(), max_key_length: cfg.max_key_length }
    }
}

pub fn app(cfg: &Config) -> anyhow::Result<Router> {
    let state: Shared = Arc::new(AppState::from_config(cfg));
    let cors = cfg.cors_layer()?;

    let api = Router::new()
        .route("/health", get(routes::health))
        .route("/cfg/modes", get(routes::get_modes))
        .route("/cfg/generate", post(routes::generate_key))
        .route("/cfg/tree", post(routes::layout_tree))
        .route("/entropy/calculate", post(routes::calculate_entropy))
        .route("/aes/encrypt", post(routes::encrypt))
        .route("/aes/decrypt", post(routes::decrypt));

    Ok(Router::new()
        .route("/", get(routes::root))
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state))
}
