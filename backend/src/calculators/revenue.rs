use serde::{Deserialize, Serialize};

use crate::config::tables::Specialty;

const WEEKS_PER_YEAR: f64 = 52.0;
const MONTHS_PER_YEAR: f64 = 12.0;
const DAYS_PER_YEAR: f64 = 365.0;

/// Annual revenue leakage for a practice, in whole dollars.
///
/// Every field is rounded on its own, so `total_loss` can differ from the sum
/// of the three components by a dollar or two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueLossResult {
    pub after_hours_loss: i64,
    pub hold_time_loss: i64,
    pub no_show_loss: i64,
    pub total_loss: i64,
    pub monthly_loss: i64,
    pub daily_loss: i64,
}

pub fn calculate_revenue_loss(specialty: Specialty, monthly_appointments: u32) -> RevenueLossResult {
    let data = specialty.coefficients();
    let appointments = f64::from(monthly_appointments);

    let after_hours_loss =
        data.avg_appt_value * data.after_hours_rate * data.weekly_after_hours_calls * WEEKS_PER_YEAR;

    let hold_time_loss = appointments * MONTHS_PER_YEAR * data.hold_abandon_rate * data.avg_appt_value;

    let no_show_loss = appointments
        * MONTHS_PER_YEAR
        * data.no_show_rate
        * data.avg_appt_value
        * data.no_show_multiplier;

    let total_loss = after_hours_loss + hold_time_loss + no_show_loss;

    RevenueLossResult {
        after_hours_loss: whole_dollars(after_hours_loss),
        hold_time_loss: whole_dollars(hold_time_loss),
        no_show_loss: whole_dollars(no_show_loss),
        total_loss: whole_dollars(total_loss),
        monthly_loss: whole_dollars(total_loss / MONTHS_PER_YEAR),
        daily_loss: whole_dollars(total_loss / DAYS_PER_YEAR),
    }
}

// Inputs are non-negative, where half-away-from-zero equals half-up.
fn whole_dollars(amount: f64) -> i64 {
    amount.round() as i64
}
