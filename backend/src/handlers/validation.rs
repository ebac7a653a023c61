use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;

/// Field name (as sent by the client) to a human readable message.
pub type FieldErrors = BTreeMap<&'static str, &'static str>;

pub const NAME_MIN_CHARS: usize = 2;
pub const NAME_MAX_CHARS: usize = 50;
pub const PHONE_MIN_DIGITS: usize = 10;
pub const MIN_MONTHLY_APPOINTMENTS: u32 = 1;
pub const MAX_MONTHLY_APPOINTMENTS: u32 = 10_000;

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("tag pattern compiles"));
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

/// Strips anything tag-shaped and trims surrounding whitespace.
pub fn sanitize_text(value: &str) -> String {
    TAG_RE.replace_all(value, "").trim().to_string()
}

/// Length check on an already sanitized name.
pub fn is_valid_name(name: &str) -> bool {
    let len = name.chars().count();
    (NAME_MIN_CHARS..=NAME_MAX_CHARS).contains(&len)
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

pub fn is_valid_phone(phone: &str) -> bool {
    phone.chars().filter(|c| c.is_ascii_digit()).count() >= PHONE_MIN_DIGITS
}

pub fn is_selected(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Accepts a JSON number or a numeric string holding a whole number in
/// `1..=10000`.
pub fn parse_monthly_appointments(raw: Option<&serde_json::Value>) -> Option<u32> {
    let number = match raw? {
        serde_json::Value::Number(n) => n.as_f64()?,
        serde_json::Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                return None;
            }
            s.parse::<f64>().ok()?
        }
        _ => return None,
    };

    if !number.is_finite() || number.fract() != 0.0 {
        return None;
    }
    if number < f64::from(MIN_MONTHLY_APPOINTMENTS) || number > f64::from(MAX_MONTHLY_APPOINTMENTS) {
        return None;
    }
    Some(number as u32)
}
