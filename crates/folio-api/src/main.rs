//! Folio entry point.
//!
//! Binary name: `folio`
//!
//! Loads configuration and secrets, initializes tracing, then serves the chat
//! API or runs an inspection command.

mod cli;
mod http;
mod state;

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio_util::sync::CancellationToken;

use folio_core::clock::SystemClock;
use folio_core::rate_limit::RateLimiter;
use folio_infra::config::{load_config, resolve_config_path};
use folio_infra::secret::Secrets;
use folio_observe::{LogFormat, TracingOptions};

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut tracing_options = TracingOptions::from_verbosity(cli.verbose);
    tracing_options.otel = cli.otel;
    if cli.json_logs {
        tracing_options.format = LogFormat::Json;
    }
    folio_observe::init_tracing(&tracing_options)
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    let config_path = resolve_config_path(cli.config);
    let config = load_config(&config_path).await;
    tracing::debug!(path = %config_path.display(), "configuration loaded");

    let result = match cli.command {
        Commands::Serve { host, port } => {
            let host = host.unwrap_or_else(|| config.server.host.clone());
            let port = port.unwrap_or(config.server.port);
            serve(&config, &host, port).await
        }
        Commands::Config => cli::inspect::print_config(&config),
        Commands::Context => cli::inspect::print_context(&config).await,
    };

    folio_observe::shutdown_tracing();
    result
}

async fn serve(config: &folio_types::config::FolioConfig, host: &str, port: u16) -> anyhow::Result<()> {
    let state = AppState::new(config, Secrets::from_env(), Arc::new(SystemClock))?;
    if state.gate.allows_unauthenticated() {
        tracing::warn!("internal secret gate is DISABLED ([auth] allow_unauthenticated = true)");
    }

    let shutdown = CancellationToken::new();
    let pruner = tokio::spawn(prune_buckets(state.clone(), shutdown.clone()));
    let reloader = tokio::spawn(reload_on_hangup(state.clone(), shutdown.clone()));

    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, "folio listening");

    let router = http::router::build_router(state);
    let token = shutdown.clone();
    axum::serve(listener, router)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            token.cancel();
        })
        .await?;

    shutdown.cancel();
    let _ = pruner.await;
    let _ = reloader.await;
    tracing::info!("server stopped");
    Ok(())
}

/// Periodically drop expired rate buckets until `shutdown` fires.
async fn prune_buckets(state: AppState, shutdown: CancellationToken) {
    let limiter: &RateLimiter = state.chat_service.limiter();
    let mut interval = tokio::time::interval(limiter.window().max(Duration::from_secs(1)));
    interval.tick().await;

    loop {
        tokio::select! {
            _ = shutdown.cancelled() => break,
            _ = interval.tick() => {
                let removed = limiter.prune();
                if removed > 0 {
                    tracing::debug!(removed, remaining = limiter.len(), "pruned expired rate buckets");
                }
            }
        }
    }
}

/// Invalidate the context cache on every SIGHUP until `shutdown` fires.
#[cfg(unix)]
async fn reload_on_hangup(state: AppState, shutdown: CancellationToken) {
    use tokio::signal::unix::{SignalKind, signal};

    let mut hangup = match signal(SignalKind::hangup()) {
        Ok(hangup) => hangup,
        Err(e) => {
            tracing::error!(error = %e, "failed to install SIGHUP handler");
            return;
        }
    };

    loop {
        tokio::select! {
            _ = shutdown.cancelled() => break,
            received = hangup.recv() => match received {
                Some(()) => state.reload_context().await,
                None => break,
            },
        }
    }
}

#[cfg(not(unix))]
async fn reload_on_hangup(_state: AppState, shutdown: CancellationToken) {
    shutdown.cancelled().await;
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
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
                tracing::error!(error = %e, "failed to install SIGTERM handler");
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
