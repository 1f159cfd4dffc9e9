//! grammarkey API server
//!
//! Configuration (environment variables):
//!   GRAMMARKEY_BIND             - Listen address (default: 0.0.0.0)
//!   GRAMMARKEY_PORT             - Listen port (default: 8000)
//!   GRAMMARKEY_CORS_ORIGINS     - Comma-separated origins, or "*" (default: local dev servers)
//!   GRAMMARKEY_KDF_ITERATIONS   - PBKDF2 rounds (default: 100000)
//!   GRAMMARKEY_MAX_KEY_LENGTH   - Largest explicit key length (default: 4096)
//!   GRAMMARKEY_LOG_FORMAT       - "json" for structured logging, "pretty" for dev

use anyhow::Context;

use grammarkey_api::{app, Config, LogFormat};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg = Config::from_env()?;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "grammarkey_api=info,grammarkey=info,tower_http=info".into());
    if cfg.log_format == LogFormat::Json {
        tracing_subscriber::fmt().json().with_env_filter(env_filter).with_target(true).with_thread_ids(true).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let router = app(&cfg)?;
    let addr = cfg.listen_addr();

    tracing::info!(
        addr = %addr,
        kdf_iterations = cfg.kdf_iterations,
        max_key_length = cfg.max_key_length,
        cors = ?cfg.cors_origins,
        "starting grammarkey API v{}",
        env!("CARGO_PKG_VERSION")
    );

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("bind {}", addr))?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}
