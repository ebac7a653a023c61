use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;

use crate::calculators::governance::calculate_governance_score;
use crate::calculators::revenue::calculate_revenue_loss;
use crate::handlers::lead_dtos::{
    FieldErrorsResponse, GovernanceFormRequest, RedirectResponse, RevenueFormRequest,
    GENERAL_DELIVERY_ERROR,
};
use crate::handlers::result_store::{
    session_cookie, session_id_from_headers, StoreError, GOVERNANCE_RESULTS_KEY,
    REVENUE_RESULTS_KEY,
};
use crate::handlers::validation::FieldErrors;
use crate::models::lead_models::{GovernanceResultRecord, RevenueResultRecord};
use crate::AppState;

pub const REVENUE_RESULTS_ROUTE: &str = "/revenue-calculator-results";
pub const GOVERNANCE_RESULTS_ROUTE: &str = "/governance-scorecard-results";

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        tracing::error!("{}", e);
        ApiError::internal("Could not save your results. Please try again.")
    }
}

/// Where a single form submission ended up.
#[derive(Debug)]
pub enum SubmissionOutcome {
    /// Honeypot was filled in; nothing happened.
    Discarded,
    Invalid(FieldErrors),
    DeliveryFailed,
    Persisted {
        set_cookie: String,
        redirect: &'static str,
    },
}

impl IntoResponse for SubmissionOutcome {
    fn into_response(self) -> Response {
        match self {
            SubmissionOutcome::Discarded => StatusCode::NO_CONTENT.into_response(),
            SubmissionOutcome::Invalid(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(FieldErrorsResponse { errors }),
            )
                .into_response(),
            SubmissionOutcome::DeliveryFailed => (
                StatusCode::BAD_GATEWAY,
                Json(json!({ "error": GENERAL_DELIVERY_ERROR })),
            )
                .into_response(),
            SubmissionOutcome::Persisted { set_cookie, redirect } => (
                [(header::SET_COOKIE, set_cookie)],
                Json(RedirectResponse { redirect }),
            )
                .into_response(),
        }
    }
}

/// Delivers the lead, then hands the computed record to the results page.
/// Nothing is stored unless delivery succeeded or no webhook is configured.
async fn deliver_and_persist<P, R>(
    state: &AppState,
    headers: &HeaderMap,
    lead: &P,
    record: &R,
    key: &'static str,
    redirect: &'static str,
) -> Result<SubmissionOutcome, ApiError>
where
    P: Serialize,
    R: Serialize,
{
    if let Err(e) = state.lead_webhook.deliver(lead).await {
        tracing::error!("Lead delivery failed for {}: {}", key, e);
        return Ok(SubmissionOutcome::DeliveryFailed);
    }

    let value = serde_json::to_value(record).map_err(|e| {
        tracing::error!("Failed to serialize {} record: {}", key, e);
        ApiError::internal("Could not save your results. Please try again.")
    })?;

    let session = state
        .result_store
        .stash(session_id_from_headers(headers), key, value)
        .await?;

    Ok(SubmissionOutcome::Persisted {
        set_cookie: session_cookie(&session, !state.settings.is_development()),
        redirect,
    })
}

pub async fn submit_revenue_calculator(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(form): Json<RevenueFormRequest>,
) -> Result<SubmissionOutcome, ApiError> {
    if form.honeypot_filled() {
        tracing::info!("Discarding revenue calculator submission with filled honeypot");
        return Ok(SubmissionOutcome::Discarded);
    }

    let (lead, specialty) = match form.validate() {
        Ok(valid) => valid,
        Err(errors) => {
            tracing::debug!("Revenue calculator form rejected: {:?}", errors.keys());
            return Ok(SubmissionOutcome::Invalid(errors));
        }
    };

    let result = calculate_revenue_loss(specialty, lead.monthly_appointments);
    tracing::info!(
        specialty = specialty.label(),
        monthly_appointments = lead.monthly_appointments,
        total_loss = result.total_loss,
        "Revenue loss calculated"
    );

    let record = RevenueResultRecord { lead, result };
    deliver_and_persist(
        &state,
        &headers,
        &record.lead,
        &record,
        REVENUE_RESULTS_KEY,
        REVENUE_RESULTS_ROUTE,
    )
    .await
}

pub async fn submit_governance_scorecard(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(form): Json<GovernanceFormRequest>,
) -> Result<SubmissionOutcome, ApiError> {
    if form.honeypot_filled() {
        tracing::info!("Discarding governance scorecard submission with filled honeypot");
        return Ok(SubmissionOutcome::Discarded);
    }

    let lead = match form.validate() {
        Ok(lead) => lead,
        Err(errors) => {
            tracing::debug!("Governance scorecard form rejected: {:?}", errors.keys());
            return Ok(SubmissionOutcome::Invalid(errors));
        }
    };

    let result = calculate_governance_score(&lead.job_title, &lead.organization_size, &lead.currently_using_ai);
    tracing::info!(
        job_title = %lead.job_title,
        organization_size = %lead.organization_size,
        score = result.score,
        risk_level = result.risk_level.label(),
        "Governance score calculated"
    );

    let record = GovernanceResultRecord { lead, result };
    deliver_and_persist(
        &state,
        &headers,
        &record.lead,
        &record,
        GOVERNANCE_RESULTS_KEY,
        GOVERNANCE_RESULTS_ROUTE,
    )
    .await
}
