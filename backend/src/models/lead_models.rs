use serde::{Deserialize, Serialize};

use crate::calculators::governance::GovernanceScoreResult;
use crate::calculators::revenue::RevenueLossResult;

/// Sanitized revenue form, exactly as posted to the lead webhook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueLeadPayload {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub specialty: String,
    pub monthly_appointments: u32,
}

/// Sanitized governance form, exactly as posted to the lead webhook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GovernanceLeadPayload {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub job_title: String,
    pub organization_size: String,
    pub industry: String,
    #[serde(rename = "currentlyUsingAI")]
    pub currently_using_ai: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenueResultRecord {
    #[serde(flatten)]
    pub lead: RevenueLeadPayload,
    #[serde(flatten)]
    pub result: RevenueLossResult,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GovernanceResultRecord {
    #[serde(flatten)]
    pub lead: GovernanceLeadPayload,
    #[serde(flatten)]
    pub result: GovernanceScoreResult,
}
