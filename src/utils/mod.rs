use anyhow::{anyhow, Result};
use chrono::Utc;

pub fn now_rfc3339() -> String {
    Utc::now().to_rfc3339()
}

/// Form-boundary coercion: empty input counts as 0, comma decimal
/// separators are tolerated.
pub fn parse_decimal(value: &str) -> Result<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(0.0);
    }
    trimmed
        .replace(',', ".")
        .parse::<f64>()
        .map_err(|e| anyhow!("Parse decimal '{}': {}", value, e))
}

pub fn parse_count(value: &str) -> Result<i64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    trimmed
        .parse::<i64>()
        .map_err(|e| anyhow!("Parse count '{}': {}", value, e))
}

/// 2 decimal places with thousands separators, e.g. 1234567.5 -> "1,234,567.50".
pub fn format_currency(value: f64) -> String {
    let rounded = (value.abs() * 100.0).round();
    let whole = (rounded / 100.0).trunc() as u64;
    let cents = (rounded % 100.0) as u64;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && rounded > 0.0 { "-" } else { "" };
    format!("{}{}.{:02}", sign, grouped, cents)
}

pub fn format_percent(value: f64) -> String {
    format!("{:.2}%", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_decimal_coerces_to_zero() {
        assert_eq!(parse_decimal("").unwrap(), 0.0);
        assert_eq!(parse_decimal("   ").unwrap(), 0.0);
    }

    #[test]
    fn comma_decimal_separator_is_accepted() {
        assert_eq!(parse_decimal("1234,56").unwrap(), 1234.56);
        assert_eq!(parse_decimal("99.5").unwrap(), 99.5);
    }

    #[test]
    fn garbage_decimal_is_rejected() {
        assert!(parse_decimal("ten").is_err());
    }

    #[test]
    fn empty_count_coerces_to_zero() {
        assert_eq!(parse_count("").unwrap(), 0);
        assert_eq!(parse_count("42").unwrap(), 42);
        assert!(parse_count("4.2").is_err());
    }

    #[test]
    fn currency_groups_thousands() {
        assert_eq!(format_currency(0.0), "0.00");
        assert_eq!(format_currency(1_000.0), "1,000.00");
        assert_eq!(format_currency(1_234_567.5), "1,234,567.50");
        assert_eq!(format_currency(-4_000.0), "-4,000.00");
    }

    #[test]
    fn percent_has_two_decimals() {
        assert_eq!(format_percent(47.5), "47.50%");
        assert_eq!(format_percent(-80.0), "-80.00%");
    }
}
