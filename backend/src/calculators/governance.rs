use serde::{Deserialize, Serialize};

use crate::config::tables::{AiUsage, JobTitle, OrganizationSize};

pub const MEDIUM_RISK_THRESHOLD: u32 = 40;
pub const LOW_RISK_THRESHOLD: u32 = 70;
/// Scale the score is presented against.
pub const SCORE_SCALE: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    #[serde(rename = "High Risk")]
    High,
    #[serde(rename = "Medium Risk")]
    Medium,
    #[serde(rename = "Low Risk")]
    Low,
}

impl RiskLevel {
    pub fn from_score(score: u32) -> Self {
        if score < MEDIUM_RISK_THRESHOLD {
            RiskLevel::High
        } else if score < LOW_RISK_THRESHOLD {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RiskLevel::High => "High Risk",
            RiskLevel::Medium => "Medium Risk",
            RiskLevel::Low => "Low Risk",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            RiskLevel::High => "#DC2626",
            RiskLevel::Medium => "#F59E0B",
            RiskLevel::Low => "#10B981",
        }
    }
}

/// Governance readiness score.
///
/// The point tables top out at 60 while clients present the score out of 100,
/// which also leaves `RiskLevel::Low` unreachable. `score` mirrors
/// `raw_score`; no scaling is applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GovernanceScoreResult {
    pub raw_score: u32,
    pub score: u32,
    pub risk_level: RiskLevel,
    pub risk_color: String,
}

/// Scores the three selections. A label outside its table is worth 0 points
/// rather than an error.
pub fn calculate_governance_score(
    job_title: &str,
    organization_size: &str,
    currently_using_ai: &str,
) -> GovernanceScoreResult {
    let mut score = 0;
    score += AiUsage::from_label(currently_using_ai).map_or(0, AiUsage::points);
    score += JobTitle::from_label(job_title).map_or(0, JobTitle::points);
    score += OrganizationSize::from_label(organization_size).map_or(0, OrganizationSize::points);

    let risk_level = RiskLevel::from_score(score);

    GovernanceScoreResult {
        raw_score: score,
        score,
        risk_level,
        risk_color: risk_level.color().to_string(),
    }
}
