/*
 * Responsibility
 * - Tracing init → Config → AuthService → Router
 * - Apply cross-cutting middleware (request id / trace / CORS / security headers)
 * - Start with axum::serve()
 */
use std::{panic, process};

use anyhow::{Context, Result};
use axum::Router;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    api,
    config::Config,
    middleware::{cors, http, security_headers},
    services::auth::build_auth_service,
    state::AppState,
};

pub async fn run() -> Result<()> {
    init_tracing();

    let config = Config::from_env().context("invalid configuration")?;
    init_panic_hook(!config.app_env.is_production());
    let auth = build_auth_service(&config).context("failed to build auth service")?;

    tracing::info!(
        env = ?config.app_env,
        strategy = auth.strategy_name(),
        "identity strategy selected"
    );

    let state = AppState::new(auth);
    let app = build_router(state, &config);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!(addr = %config.addr, "listening");
    axum::serve(listener, app).await?;
    Ok(())
}

pub fn build_router(state: AppState, config: &Config) -> Router {
    let router = Router::new()
        .nest("/api/v1", api::v1::routes(state.clone()))
        .with_state(state);

    let router = security_headers::apply(router);
    let router = cors::apply(router, config);
    http::apply(router)
}

fn init_tracing() {
    // RUST_LOG wins when set, e.g. RUST_LOG=info,pickup_api=debug
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        tracing::error!(?info, "panic");

        // Outside production a panic takes the whole process down.
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}
