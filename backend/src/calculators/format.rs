/// US-dollar amount with thousands separators and no cents, e.g. `$866,520`.
pub fn format_currency(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if amount < 0 {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}

/// Plain count with thousands separators, e.g. `10,000`.
pub fn format_count(count: u32) -> String {
    format_currency(i64::from(count)).trim_start_matches('$').to_string()
}
