//! Application entry point — Thai script relay.
//!
//! # Startup sequence
//!
//! 1. Load `.env` (if present) and initialise logging.
//! 2. Load [`AppConfig`] from disk (defaults when missing) and overlay the
//!    environment (`MISTRAL_API_KEY`, `HOST`, `PORT`).
//! 3. Build the upstream clients into [`AppState`].  A missing API key is
//!    reported here and again on every `/generate-script` call.
//! 4. Bind the listener and serve until SIGINT / SIGTERM.

use anyhow::Context;
use thai_script_relay::config::AppConfig;
use thai_script_relay::server::{build_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Environment + logging
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Thai script relay starting up");

    // 2. Configuration
    let mut config = AppConfig::load().unwrap_or_else(|e| {
        log::warn!("Failed to load config ({e}); using defaults");
        AppConfig::default()
    });
    config.apply_env();

    // 3. Upstream clients
    let state = AppState::from_config(&config)?;

    // 4. Serve
    let app = build_router(state, &config.server);
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    log::info!("Listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    log::info!("Shut down cleanly");
    Ok(())
}

/// Resolve on SIGINT (Ctrl-C) or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::error!("Failed to listen for Ctrl-C: {e}");
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
                log::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => log::info!("Received SIGINT, shutting down"),
        () = terminate => log::info!("Received SIGTERM, shutting down"),
    }
}
