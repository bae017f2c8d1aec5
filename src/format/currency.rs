//! US-dollar currency strings.

/// Format an amount as US currency with thousands separators and exactly
/// two decimals, e.g. `1500.5` becomes `"$1,500.50"`.
///
/// Non-finite amounts produce an empty string.
pub fn format_price(amount: f64) -> String {
    if !amount.is_finite() {
        return String::new();
    }

    let (dollars, cents) = split_cents(amount);
    let sign = if amount < 0.0 && (dollars > 0 || cents > 0) {
        "-"
    } else {
        ""
    };

    format!("{}${}.{:02}", sign, group_thousands(dollars), cents)
}

/// Plain two-decimal amount without symbol or separators, e.g. `"2500.00"`.
pub fn format_amount(amount: f64) -> String {
    if !amount.is_finite() {
        return String::new();
    }
    format!("{:.2}", amount)
}

fn split_cents(amount: f64) -> (u64, u64) {
    let total_cents = (amount.abs() * 100.0).round() as u64;
    (total_cents / 100, total_cents % 100)
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(1500.0), "$1,500.00");
        assert_eq!(format_price(1500.5), "$1,500.50");
        assert_eq!(format_price(0.0), "$0.00");
        assert_eq!(format_price(999.999), "$1,000.00");
        assert_eq!(format_price(1_234_567.891), "$1,234,567.89");
    }

    #[test]
    fn test_format_price_negative() {
        assert_eq!(format_price(-42.5), "-$42.50");
    }

    #[test]
    fn test_format_price_non_finite() {
        assert_eq!(format_price(f64::NAN), "");
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(2500.0), "2500.00");
        assert_eq!(format_amount(1500.5), "1500.50");
        assert_eq!(format_amount(f64::NEG_INFINITY), "");
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(100_000), "100,000");
    }
}
