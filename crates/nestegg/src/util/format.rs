/// Group the digits of a non-negative whole number with commas
fn group_thousands(whole: u64) -> String {
    let digits = whole.to_string();
    let mut result = String::new();
    for (i, c) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

/// Format a currency value without cents (e.g., $866,245)
pub fn format_currency_short(value: f64) -> String {
    if !value.is_finite() {
        return "n/a".to_string();
    }

    let whole = value.abs().round() as u64;
    if value < 0.0 && whole > 0 {
        format!("-${}", group_thousands(whole))
    } else {
        format!("${}", group_thousands(whole))
    }
}

/// Format an annual rate already expressed in percent (7.0 -> "7.00%")
pub fn format_rate(percent: f64) -> String {
    format!("{:.2}%", percent)
}

/// Format a fraction as a percentage (0.25 -> "25.0%")
pub fn format_share(fraction: f64) -> String {
    format!("{:.1}%", fraction * 100.0)
}
