use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use dotenvy::dotenv;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use lead_calculators::{build_router, config::settings::Settings, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let settings = Settings::from_env().context("invalid configuration")?;

    let _guard = settings.sentry_dsn.as_deref().map(|dsn| {
        sentry::init((dsn, sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: Some(settings.environment.clone().into()),
            ..Default::default()
        }))
    });

    let bind_addr = settings.bind_addr;
    let state = Arc::new(AppState::new(settings).context("failed to build HTTP client")?);
    if !state.lead_webhook.is_configured() {
        tracing::warn!("LEAD_CAPTURE_WEBHOOK_URL not set, leads will not be delivered anywhere");
    }
    let sweep_period = state.settings.results_ttl.min(Duration::from_secs(60));
    state.result_store.spawn_sweeper(sweep_period);
    let app = build_router(state);

    let listener = TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;
    tracing::info!("Listening on {}", bind_addr);
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
