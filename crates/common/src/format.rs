use num_format::{Locale, ToFormattedString};

/// Format a dollar amount with a thousands separator and two decimals,
/// e.g. `64000.0` → `"$64,000.00"`.
pub fn usd(value: f64) -> String {
    let cents = (value.abs() * 100.0).round() as u64;
    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    format!(
        "{sign}${}.{:02}",
        (cents / 100).to_formatted_string(&Locale::en),
        cents % 100
    )
}

/// Signed percent with two decimals, e.g. `1.5` → `"+1.50%"`.
pub fn signed_pct(value: f64) -> String {
    // -0.0 would otherwise render as "-0.00%"
    let value = if value == 0.0 { 0.0 } else { value };
    format!("{value:+.2}%")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usd_groups_thousands() {
        assert_eq!(usd(64_000.0), "$64,000.00");
        assert_eq!(usd(1_234_567.891), "$1,234,567.89");
        assert_eq!(usd(0.1), "$0.10");
        assert_eq!(usd(999.999), "$1,000.00");
    }

    #[test]
    fn usd_keeps_sign() {
        assert_eq!(usd(-12.5), "-$12.50");
        assert_eq!(usd(-0.001), "$0.00");
    }

    #[test]
    fn pct_is_always_signed() {
        assert_eq!(signed_pct(1.5), "+1.50%");
        assert_eq!(signed_pct(-2.0), "-2.00%");
        assert_eq!(signed_pct(0.0), "+0.00%");
        assert_eq!(signed_pct(-0.0), "+0.00%");
    }
}
