//! Tripvote server entry point.
//!
//! Loads configuration, wires the AI provider, place lookups and session
//! store, then serves the HTTP API and chat socket until shutdown.

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use tripvote::adapters::ai::{OpenAIConfig, OpenAIProvider};
use tripvote::adapters::http::build_router;
use tripvote::adapters::lookup::OpenDataLookup;
use tripvote::adapters::storage::InMemorySessionStore;
use tripvote::config::AppConfig;
use tripvote::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("failed to load configuration")?;
    init_tracing(&config);
    config.validate().context("invalid configuration")?;

    let ai = &config.ai;
    let api_key = ai.api_key.clone().unwrap_or_default();
    let mut ai_config = OpenAIConfig::new(api_key)
        .with_model(&ai.model)
        .with_base_url(&ai.base_url);
    if let Some(timeout) = ai.timeout() {
        ai_config = ai_config.with_timeout(timeout);
    }
    let provider = OpenAIProvider::new(ai_config).context("failed to build AI client")?;
    let lookup = OpenDataLookup::new(config.lookup.to_open_data_config())
        .context("failed to build lookup client")?;

    let state = AppState::new(
        Arc::new(provider),
        Arc::new(lookup),
        Arc::new(InMemorySessionStore::new()),
        ai.system_prompt.as_deref(),
        config.chat.clone(),
    );
    tracing::info!(
        model = %ai.model,
        capabilities = ?config.chat.capabilities,
        "Services initialized"
    );

    let router = build_router(state, &config.server);
    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    tracing::info!(%addr, "Tripvote listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// `RUST_LOG` wins over the configured filter. JSON lines in production.
fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if config.is_production() {
        builder.json().init();
    } else {
        builder.with_target(false).init();
    }
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
