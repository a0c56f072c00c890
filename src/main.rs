//! Domain Cache - admin server for per-entity-type caches
//!
//! Builds the cache registry, registers one cache per entity type, runs the
//! eviction sweeper and serves the admin API.

use std::net::SocketAddr;

use anyhow::Context;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use domain_cache::api::{create_router, AppState};
use domain_cache::models::{Patient, Prescription, User};
use domain_cache::{CacheRegistry, Config, DomainObject, EvictionSweeper};

/// Main entry point.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create the cache registry and register every entity type
/// 4. Start the eviction sweeper
/// 5. Serve the admin API on the configured port
/// 6. On SIGINT/SIGTERM, stop the server, then stop and join the sweeper
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "domain_cache=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Domain Cache");

    let config = Config::from_env();
    info!(
        "Configuration loaded: capacity={}, ttl={}s, sweep_interval={}s, port={}, overrides={}",
        config.cache_capacity,
        config.cache_ttl,
        config.sweep_interval,
        config.server_port,
        config.overrides.len()
    );

    let registry = CacheRegistry::new();
    register_entity_caches(&registry, &config);
    info!("Registered caches: {:?}", registry.names());

    let sweeper = EvictionSweeper::new(registry.clone(), config.sweep_interval()).spawn();

    let app = create_router(AppState::new(registry));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    sweeper.shutdown().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Registers the cache of every persisted entity type up front.
fn register_entity_caches(registry: &CacheRegistry, config: &Config) {
    registry.register_or_get::<User>(config.cache_config_for(User::TYPE_NAME));
    registry.register_or_get::<Patient>(config.cache_config_for(Patient::TYPE_NAME));
    registry.register_or_get::<Prescription>(config.cache_config_for(Prescription::TYPE_NAME));
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
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
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }
}
