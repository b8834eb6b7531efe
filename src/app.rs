/*
 * Responsibility
 * - Load Config → build dependencies → assemble the Router
 * - Apply middleware (access/security headers/http)
 * - Start axum::serve() and shut down gracefully on SIGTERM (Cloud Run) or Ctrl-C
 */
use std::{panic, process, sync::Arc, time::Duration};

use anyhow::{Context, Result};
use axum::{Router, routing::get};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api;
use crate::api::handlers::health::root;
use crate::config::Config;
use crate::middleware;
use crate::services::auth::build_verification_mode;
use crate::services::cloud_run::CloudRunLister;
use crate::state::AppState;

fn init_tracing() {
    // Prefer RUST_LOG if set; otherwise use a sensible default.
    // Ex:
    // RUST_LOG=info,bearer_gate=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    // Keep the default hook as a fallback (prints to stderr with location/payload).
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        // Always surface panics via tracing so they don't get lost.
        tracing::error!(?info, "panic");

        // Development: fail fast. Production: default behavior, keep serving.
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env().context("failed to load configuration")?;

    init_panic_hook(!config.app_env.is_production());

    tracing::info!(
        env = ?config.app_env,
        auth_mode = ?config.auth.mode(),
        addr = %config.addr,
        "starting bearer gate"
    );

    let state = build_state(&config)?;
    let app = build_router(
        state,
        Duration::from_secs(config.request_timeout_seconds),
    );

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("server stopped");
    Ok(())
}

fn build_state(config: &Config) -> Result<AppState> {
    // Process-level services: built once, injected through AppState.
    let verifier = build_verification_mode(&config.auth);

    if config.gcp_project.is_none() {
        tracing::info!("GOOGLE_CLOUD_PROJECT not set; /api/services will answer 503");
    }
    let lister = CloudRunLister::new(config.gcp_project.clone(), config.cloud_run_region.clone())
        .context("failed to build cloud run client")?;

    Ok(AppState::new(verifier, Arc::new(lister)))
}

/// Full application router with all middleware applied.
pub fn build_router(state: AppState, request_timeout: Duration) -> Router {
    let router = Router::new()
        .route("/", get(root))
        .nest("/api", api::routes(state.clone()))
        .with_state(state);

    let router = middleware::security_headers::apply(router);
    middleware::http::apply(router, request_timeout)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
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

    tracing::info!("shutdown signal received");
}
