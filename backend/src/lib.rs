use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

pub mod config {
    pub mod settings;
    pub mod tables;
}
pub mod calculators {
    pub mod format;
    pub mod governance;
    pub mod report;
    pub mod revenue;
}
pub mod handlers {
    pub mod calculator_handlers;
    pub mod lead_dtos;
    pub mod result_store;
    pub mod results_handlers;
    pub mod validation;
}
pub mod api {
    pub mod lead_webhook;
}
pub mod models {
    pub mod lead_models;
}

use api::lead_webhook::{DeliveryError, LeadWebhook};
use config::settings::Settings;
use handlers::calculator_handlers;
use handlers::result_store::ResultStore;
use handlers::results_handlers;

pub struct AppState {
    pub settings: Settings,
    pub lead_webhook: LeadWebhook,
    pub result_store: ResultStore,
}

impl AppState {
    pub fn new(settings: Settings) -> Result<Self, DeliveryError> {
        let lead_webhook = LeadWebhook::new(settings.webhook_url.clone(), settings.webhook_timeout)?;
        let result_store = ResultStore::new(settings.results_ttl);
        Ok(Self {
            settings,
            lead_webhook,
            result_store,
        })
    }
}

async fn health_check() -> &'static str {
    "OK"
}

fn cors_layer(settings: &Settings) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
        .expose_headers([header::CONTENT_TYPE]);

    // Cookies only travel cross-origin to an exact, credentialed origin.
    match settings
        .frontend_url
        .as_deref()
        .and_then(|url| HeaderValue::from_str(url.trim_end_matches('/')).ok())
    {
        Some(origin) => cors
            .allow_origin(AllowOrigin::exact(origin))
            .allow_credentials(true),
        None => cors.allow_origin(Any),
    }
}

pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = cors_layer(&state.settings);

    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/calculators/options", get(results_handlers::get_form_options))
        .route("/api/revenue-calculator", post(calculator_handlers::submit_revenue_calculator))
        .route("/api/governance-scorecard", post(calculator_handlers::submit_governance_scorecard))
        .route("/api/revenue-calculator-results", get(results_handlers::revenue_calculator_results))
        .route("/api/governance-scorecard-results", get(results_handlers::governance_scorecard_results))
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                        .on_response(DefaultOnResponse::new().level(Level::INFO)),
                )
                .layer(cors),
        )
        .with_state(state)
}
