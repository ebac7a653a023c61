use std::sync::Arc;

use axum::{
    extract::State,
    http::HeaderMap,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use serde::{de::DeserializeOwned, Serialize};

use crate::calculators::report::{governance_report, revenue_report};
use crate::config::tables::{FormOptions, FORM_OPTIONS};
use crate::handlers::calculator_handlers::ApiError;
use crate::handlers::result_store::{
    session_id_from_headers, GOVERNANCE_RESULTS_KEY, REVENUE_RESULTS_KEY,
};
use crate::models::lead_models::{GovernanceResultRecord, RevenueResultRecord};
use crate::AppState;

pub const ENTRY_ROUTE: &str = "/";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultsResponse<D, R> {
    pub data: D,
    pub report: R,
    pub booking_url: String,
}

pub async fn get_form_options() -> Json<FormOptions> {
    Json(FORM_OPTIONS.clone())
}

/// Consumes the stored record. `None` covers absent, expired and
/// wrongly-shaped slots alike.
async fn take_record<T: DeserializeOwned>(
    state: &AppState,
    headers: &HeaderMap,
    key: &str,
) -> Result<Option<T>, ApiError> {
    let stored = state
        .result_store
        .take(session_id_from_headers(headers), key)
        .await?;

    Ok(stored.and_then(|value| match serde_json::from_value(value) {
        Ok(record) => Some(record),
        Err(e) => {
            tracing::warn!("Discarding unreadable {} record: {}", key, e);
            None
        }
    }))
}

pub async fn revenue_calculator_results(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let Some(record) = take_record::<RevenueResultRecord>(&state, &headers, REVENUE_RESULTS_KEY).await? else {
        tracing::debug!("No revenue calculator results in session, redirecting to entry page");
        return Ok(Redirect::to(ENTRY_ROUTE).into_response());
    };

    let report = revenue_report(&record);
    Ok(Json(ResultsResponse {
        data: record,
        report,
        booking_url: state.settings.booking_url.clone(),
    })
    .into_response())
}

pub async fn governance_scorecard_results(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let Some(record) = take_record::<GovernanceResultRecord>(&state, &headers, GOVERNANCE_RESULTS_KEY).await? else {
        tracing::debug!("No governance scorecard results in session, redirecting to entry page");
        return Ok(Redirect::to(ENTRY_ROUTE).into_response());
    };

    let report = governance_report(&record);
    Ok(Json(ResultsResponse {
        data: record,
        report,
        booking_url: state.settings.booking_url.clone(),
    })
    .into_response())
}
