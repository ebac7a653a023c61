//! Read-only report text built from a stored result record. Nothing here
//! recomputes a score or a loss figure.

use serde::Serialize;

use crate::calculators::format::{format_count, format_currency};
use crate::calculators::governance::{RiskLevel, SCORE_SCALE};
use crate::models::lead_models::{GovernanceResultRecord, RevenueResultRecord};

#[derive(Debug, Clone, Serialize)]
pub struct LabeledText {
    pub title: String,
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueReport {
    pub title: &'static str,
    pub greeting: String,
    pub practice_details: Vec<LabeledText>,
    pub total_loss: String,
    pub breakdown: Vec<LabeledText>,
    pub monthly_loss: String,
    pub daily_loss: String,
    pub recovery_statement: &'static str,
    pub benefits: Vec<&'static str>,
    pub example: String,
    pub timeline: Vec<LabeledText>,
    pub email_notice: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskInterpretation {
    pub headline: &'static str,
    pub summary: &'static str,
    pub exposures: Vec<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GovernanceReport {
    pub title: &'static str,
    pub subtitle: String,
    pub organization_details: Vec<LabeledText>,
    pub score: u32,
    /// Denominator shown with `score`. The tables cap the score at 60.
    pub score_out_of: u32,
    pub risk_level: &'static str,
    pub risk_color: String,
    pub interpretation: RiskInterpretation,
    pub key_findings_heading: String,
    pub key_findings_intro: String,
    pub requirements: Vec<&'static str>,
    pub gap_areas: Vec<LabeledText>,
    pub next_steps: Vec<LabeledText>,
    pub timeline: Vec<LabeledText>,
    pub email_notice: String,
}

const GAP_AREAS: [(&str, &str); 6] = [
    ("AI Usage Visibility", "Most organizations discover 3–5x more AI usage than documented"),
    ("Data & Information Risks", "AI risk almost always begins as a data exposure problem"),
    ("Identity & Access Governance", "AI actions must be attributable for true accountability"),
    ("Vendor Oversight", "Third-party AI risk transfers directly to your organization"),
    ("Audit Readiness", "Can you defend AI decisions under regulatory scrutiny?"),
    ("Change Control", "Governance must survive new vendors, data, and use cases"),
];

const GOVERNANCE_REQUIREMENTS: [&str; 4] = [
    "Formal AI governance committee structure",
    "Board-level risk reporting framework",
    "ISO 42001-aligned governance system",
    "Continuous assurance processes",
];

const GOVERNANCE_NEXT_STEPS: [(&str, &str); 3] = [
    (
        "Schedule AI Governance Strategy Call (30 minutes)",
        "Discuss your specific governance gaps and remediation roadmap",
    ),
    (
        "Review Detailed Scorecard Breakdown",
        "We'll send your complete assessment to your email",
    ),
    (
        "Develop 90-Day Rapid Remediation Plan",
        "Healthcare enterprises reduce gaps by 60–80% in 90 days with our framework",
    ),
];

const GOVERNANCE_TIMELINE: [(&str, &str); 4] = [
    ("Today", "Receive your detailed governance scorecard via email"),
    ("Day 2", "Case study: How an enterprise avoided $10M valuation haircut"),
    ("Day 5", "4 questions your board is about to ask"),
    ("Day 7", "ISO 42001 explained for healthcare"),
];

fn labeled(title: impl Into<String>, text: impl Into<String>) -> LabeledText {
    LabeledText {
        title: title.into(),
        text: text.into(),
    }
}

pub fn interpret_risk(level: RiskLevel) -> RiskInterpretation {
    match level {
        RiskLevel::High => RiskInterpretation {
            headline: "CRITICAL GAPS DETECTED",
            summary: "Your organization has significant AI governance exposure. Organizations with scores below 40 typically face:",
            exposures: vec![
                "10–20% valuation haircuts in due diligence ($5M–$50M for healthcare companies)",
                "$100K–$500K+ regulatory exposure",
                "Board fiduciary liability concerns",
            ],
        },
        RiskLevel::Medium => RiskInterpretation {
            headline: "MODERATE RISK",
            summary: "You have basic governance in place, but critical gaps remain. Organizations in this range struggle during:",
            exposures: vec![
                "PE investor due diligence",
                "Regulatory audits (OCR HIPAA)",
                "Board presentations on AI risk",
            ],
        },
        RiskLevel::Low => RiskInterpretation {
            headline: "STRONG FOUNDATION",
            summary: "You're ahead of most healthcare organizations, but there are still opportunities to strengthen your governance posture for:",
            exposures: vec![
                "ISO 42001 certification",
                "Complete audit readiness",
                "Competitive advantage in RFPs",
            ],
        },
    }
}

pub fn revenue_report(record: &RevenueResultRecord) -> RevenueReport {
    let lead = &record.lead;
    let result = &record.result;

    RevenueReport {
        title: "Your Revenue Recovery Report",
        greeting: format!("Hi {}, based on your practice details", lead.first_name),
        practice_details: vec![
            labeled("Practice Type", lead.specialty.as_str()),
            labeled("Monthly Appointments", format_count(lead.monthly_appointments)),
        ],
        total_loss: format_currency(result.total_loss),
        breakdown: vec![
            labeled("After-hours voicemail", format_currency(result.after_hours_loss)),
            labeled("Hold time abandonment", format_currency(result.hold_time_loss)),
            labeled("No-show revenue drain", format_currency(result.no_show_loss)),
        ],
        monthly_loss: format!("{}/month", format_currency(result.monthly_loss)),
        daily_loss: format!("{}/day", format_currency(result.daily_loss)),
        recovery_statement: "Practices like yours are capturing 70–90% of this lost revenue with our AI systems.",
        benefits: vec![
            "24/7 voice AI answers every call instantly",
            "45% reduction in no-show rates",
            "Zero hold times during peak hours",
        ],
        example: format!(
            "A {} practice with similar volume recovered over $1.4M in 12 months using our platform.",
            lead.specialty
        ),
        timeline: vec![
            labeled("Today", "You'll receive your detailed revenue report via email"),
            labeled("Day 2", format!("Case study: How a {} practice recovered $1.4M", lead.specialty)),
            labeled("Day 5", "Common objections answered (Will AI replace staff?)"),
            labeled("Day 7", "Local social proof from Bakersfield practices"),
        ],
        email_notice: format!("We've also sent your detailed report to {}", lead.email),
    }
}

pub fn governance_report(record: &GovernanceResultRecord) -> GovernanceReport {
    let lead = &record.lead;
    let result = &record.result;

    GovernanceReport {
        title: "Your AI Governance Readiness Score",
        subtitle: format!(
            "Enterprise AI Governance Assessment for {} {}",
            lead.first_name, lead.last_name
        ),
        organization_details: vec![
            labeled("Role", lead.job_title.as_str()),
            labeled("Organization Size", lead.organization_size.as_str()),
            labeled("Industry", lead.industry.as_str()),
            labeled("Currently Using AI", lead.currently_using_ai.as_str()),
        ],
        score: result.score,
        score_out_of: SCORE_SCALE,
        risk_level: result.risk_level.label(),
        risk_color: result.risk_color.clone(),
        interpretation: interpret_risk(result.risk_level),
        key_findings_heading: format!("Key Findings for {} Role", lead.job_title),
        key_findings_intro: format!(
            "Your organization size ({}) requires:",
            lead.organization_size
        ),
        requirements: GOVERNANCE_REQUIREMENTS.to_vec(),
        gap_areas: GAP_AREAS.iter().map(|(t, d)| labeled(*t, *d)).collect(),
        next_steps: GOVERNANCE_NEXT_STEPS.iter().map(|(t, d)| labeled(*t, *d)).collect(),
        timeline: GOVERNANCE_TIMELINE.iter().map(|(t, d)| labeled(*t, *d)).collect(),
        email_notice: format!("We've also sent your detailed scorecard to {}", lead.email),
    }
}
