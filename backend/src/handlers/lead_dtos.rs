use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::config::tables::Specialty;
use crate::handlers::validation::{
    is_selected, is_valid_email, is_valid_name, is_valid_phone, parse_monthly_appointments,
    sanitize_text, FieldErrors,
};
use crate::models::lead_models::{GovernanceLeadPayload, RevenueLeadPayload};

pub const GENERAL_DELIVERY_ERROR: &str =
    "Something went wrong sending your data. Please try again or email us directly.";

/// Accepts any JSON value for a text field so a wrongly typed field becomes a
/// field error instead of a rejected body. Scalars keep their text form,
/// anything else reads as empty.
fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => text,
        Value::Number(number) => number.to_string(),
        Value::Bool(flag) => flag.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    })
}

/// Any value other than null or an empty string means a bot filled it.
fn is_filled(honeypot: Option<&Value>) -> bool {
    match honeypot {
        None | Some(Value::Null) => false,
        Some(Value::String(text)) => !text.is_empty(),
        Some(_) => true,
    }
}

/// Raw revenue calculator form. Missing fields deserialize as empty and are
/// reported by `validate`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RevenueFormRequest {
    #[serde(deserialize_with = "lenient_text")]
    pub first_name: String,
    #[serde(deserialize_with = "lenient_text")]
    pub last_name: String,
    #[serde(deserialize_with = "lenient_text")]
    pub email: String,
    #[serde(deserialize_with = "lenient_text")]
    pub phone: String,
    #[serde(deserialize_with = "lenient_text")]
    pub specialty: String,
    pub monthly_appointments: Option<Value>,
    /// Honeypot, hidden from people.
    pub website: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GovernanceFormRequest {
    #[serde(deserialize_with = "lenient_text")]
    pub first_name: String,
    #[serde(deserialize_with = "lenient_text")]
    pub last_name: String,
    #[serde(deserialize_with = "lenient_text")]
    pub email: String,
    #[serde(deserialize_with = "lenient_text")]
    pub phone: String,
    #[serde(deserialize_with = "lenient_text")]
    pub job_title: String,
    #[serde(deserialize_with = "lenient_text")]
    pub organization_size: String,
    #[serde(deserialize_with = "lenient_text")]
    pub industry: String,
    #[serde(rename = "currentlyUsingAI", deserialize_with = "lenient_text")]
    pub currently_using_ai: String,
    /// Honeypot, hidden from people.
    pub website: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct FieldErrorsResponse {
    pub errors: FieldErrors,
}

#[derive(Debug, Serialize)]
pub struct RedirectResponse {
    pub redirect: &'static str,
}

struct Contact {
    first_name: String,
    last_name: String,
    email: String,
    phone: String,
}

fn validate_contact(
    first_name: &str,
    last_name: &str,
    email: &str,
    phone: &str,
    errors: &mut FieldErrors,
) -> Contact {
    let contact = Contact {
        first_name: sanitize_text(first_name),
        last_name: sanitize_text(last_name),
        email: email.trim().to_string(),
        phone: phone.trim().to_string(),
    };

    if !is_valid_name(&contact.first_name) {
        errors.insert("firstName", "First name must be 2–50 characters.");
    }
    if !is_valid_name(&contact.last_name) {
        errors.insert("lastName", "Last name must be 2–50 characters.");
    }
    if !is_valid_email(&contact.email) {
        errors.insert("email", "Please enter a valid email address.");
    }
    if !is_valid_phone(&contact.phone) {
        errors.insert("phone", "Please enter a valid phone number (10+ digits).");
    }
    contact
}

impl RevenueFormRequest {
    pub fn honeypot_filled(&self) -> bool {
        is_filled(self.website.as_ref())
    }

    /// Checks every field and returns either the sanitized payload plus its
    /// specialty, or all field errors at once.
    pub fn validate(&self) -> Result<(RevenueLeadPayload, Specialty), FieldErrors> {
        let mut errors = FieldErrors::new();
        let contact = validate_contact(&self.first_name, &self.last_name, &self.email, &self.phone, &mut errors);

        let specialty = Specialty::from_label(self.specialty.trim());
        if specialty.is_none() {
            errors.insert("specialty", "Please select your specialty.");
        }

        let monthly_appointments = parse_monthly_appointments(self.monthly_appointments.as_ref());
        if monthly_appointments.is_none() {
            errors.insert("monthlyAppointments", "Please enter a number between 1 and 10,000.");
        }

        match (specialty, monthly_appointments) {
            (Some(specialty), Some(monthly_appointments)) if errors.is_empty() => Ok((
                RevenueLeadPayload {
                    first_name: contact.first_name,
                    last_name: contact.last_name,
                    email: contact.email,
                    phone: contact.phone,
                    specialty: specialty.label().to_string(),
                    monthly_appointments,
                },
                specialty,
            )),
            _ => Err(errors),
        }
    }
}

impl GovernanceFormRequest {
    pub fn honeypot_filled(&self) -> bool {
        is_filled(self.website.as_ref())
    }

    pub fn validate(&self) -> Result<GovernanceLeadPayload, FieldErrors> {
        let mut errors = FieldErrors::new();
        let contact = validate_contact(&self.first_name, &self.last_name, &self.email, &self.phone, &mut errors);

        if !is_selected(&self.job_title) {
            errors.insert("jobTitle", "Please select your role.");
        }
        if !is_selected(&self.organization_size) {
            errors.insert("organizationSize", "Please select your organization size.");
        }
        if !is_selected(&self.industry) {
            errors.insert("industry", "Please select your industry.");
        }
        if !is_selected(&self.currently_using_ai) {
            errors.insert("currentlyUsingAI", "Please indicate whether you currently use AI.");
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(GovernanceLeadPayload {
            first_name: contact.first_name,
            last_name: contact.last_name,
            email: contact.email,
            phone: contact.phone,
            job_title: self.job_title.clone(),
            organization_size: self.organization_size.clone(),
            industry: self.industry.clone(),
            currently_using_ai: self.currently_using_ai.clone(),
        })
    }
}
