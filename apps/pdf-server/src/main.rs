//! PDF Server
//!
//! Extracts plain text from uploaded PDFs.
//!
//! On a managed host (`RENDER` set) the binary is started by the platform's
//! process manager, listens on all interfaces and, given
//! `RENDER_EXTERNAL_URL`, keeps itself awake with periodic self-pings.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pdf_server::config::Config;
use pdf_server::error::format_size;
use pdf_server::keepalive::KeepAlive;
use pdf_server::pdf::{MupdfBackend, TextExtractor};
use pdf_server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pdf_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().context("Failed to load configuration")?;

    tracing::info!("Starting PDF Server v{}", env!("CARGO_PKG_VERSION"));

    let extractor = TextExtractor::new(
        Arc::new(MupdfBackend::new()),
        config.upload.empty_text_policy,
    );
    tracing::info!(
        "Upload limit: {}, empty text policy: {:?}",
        format_size(config.upload.max_bytes),
        extractor.policy()
    );

    let state = AppState::new(extractor, config.upload.max_bytes);
    let app = pdf_server::build_router(state, &config.cors);

    let keep_alive = KeepAlive::spawn(&config.keep_alive, reqwest::Client::new());
    match &keep_alive {
        Some(task) => tracing::info!(
            "Keep-alive enabled: pinging {} every {:?}",
            task.url(),
            config.keep_alive.interval
        ),
        None if config.keep_alive.enabled => {
            tracing::warn!("RENDER is set but RENDER_EXTERNAL_URL is missing; keep-alive disabled")
        }
        None => tracing::debug!("Keep-alive disabled"),
    }

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid SERVER_HOST/SERVER_PORT")?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!("PDF Server listening on {}", addr);

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    if let Some(task) = keep_alive {
        task.shutdown().await;
    }

    served?;
    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
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
            tracing::info!("Received Ctrl+C, starting graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown...");
        },
    }
}
