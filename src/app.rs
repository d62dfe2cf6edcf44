/*
 * Responsibility
 * - tracing / panic hook setup
 * - Config -> dependencies (messaging client, forwarder) -> Router
 * - axum::serve()
 */
use std::{panic, process, sync::Arc};

use anyhow::{Context, Result};
use axum::Router;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api;
use crate::config::Config;
use crate::middleware;
use crate::services::auth::AuthForwarder;
use crate::services::messaging::{MessagingClient, ValkeyMessagingClient};
use crate::state::AppState;

fn init_tracing() {
    // Prefer RUST_LOG if set; otherwise use a sensible default.
    // Ex:
    // RUST_LOG=info,auth_forwarder=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        // Surface panics through tracing as well; stderr may be hidden.
        tracing::error!(?info, "panic");

        // Development: crash the whole process. Production: default hook, keep serving.
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env().context("loading configuration")?;
    init_panic_hook(!config.app_env.is_production());

    tracing::info!(
        "starting auth forwarder in {:?} mode on {}",
        config.app_env,
        config.addr
    );

    let state = build_state(&config).await?;
    let app = build_router(state, &config);

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("binding {}", config.addr))?;
    axum::serve(listener, app).await.context("serving")?;

    Ok(())
}

pub async fn build_state(config: &Config) -> Result<AppState> {
    let client: Option<Arc<dyn MessagingClient>> = match config.valkey_url.as_deref() {
        Some(url) => {
            let client = ValkeyMessagingClient::new(url)
                .await
                .context("connecting to the messaging broker")?;
            let client: Arc<dyn MessagingClient> = Arc::new(client);
            Some(client)
        }
        None => {
            tracing::warn!(
                "VALKEY_URL is not set; guarded routes will fail until a messaging client is configured"
            );
            None
        }
    };

    let forwarder = AuthForwarder::new(client)
        .with_options(config.validation_options.clone())
        .with_timeout(config.validation_timeout);

    tracing::info!(forwarder = ?forwarder, "auth forwarder ready");

    Ok(AppState::new(Arc::new(forwarder)))
}

pub fn build_router(state: AppState, config: &Config) -> Router {
    let router = Router::new()
        .nest("/api/v1", api::v1::routes(state.clone()))
        .with_state(state);

    middleware::http::apply(router, config.request_timeout)
}
