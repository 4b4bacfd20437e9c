//! Host-side Rupiah formatting and lenient parsing of typed amounts.

/// Group `value` in thousands with `.` as the separator (Indonesian style).
#[must_use]
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

/// `Rp 1.250.000`.
#[must_use]
pub fn format_rupiah(amount: u64) -> String {
    format!("Rp {}", format_thousands(amount))
}

/// Read the ASCII digits out of a typed amount such as `"Rp 1.250.000"`.
///
/// Anything without digits is 0, as is a negative amount; values past
/// `u64::MAX` saturate.
#[must_use]
pub fn parse_currency(text: &str) -> u64 {
    if text.trim_start().starts_with('-') {
        return 0;
    }
    text.bytes()
        .filter(u8::is_ascii_digit)
        .fold(0_u64, |acc, digit| {
            acc.saturating_mul(10)
                .saturating_add(u64::from(digit - b'0'))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thousands_grouping() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1_000), "1.000");
        assert_eq!(format_thousands(5_000_000), "5.000.000");
        assert_eq!(format_thousands(12_345_678), "12.345.678");
    }

    #[test]
    fn rupiah_prefix() {
        assert_eq!(format_rupiah(250_000), "Rp 250.000");
    }

    #[test]
    fn parse_strips_formatting() {
        assert_eq!(parse_currency("Rp 1.250.000"), 1_250_000);
        assert_eq!(parse_currency("1,250,000"), 1_250_000);
        assert_eq!(parse_currency("Rp"), 0);
        assert_eq!(parse_currency(""), 0);
        assert_eq!(parse_currency(" -250.000"), 0);
        assert_eq!(parse_currency(&"9".repeat(40)), u64::MAX);
    }

    #[test]
    fn format_then_parse_is_identity() {
        for amount in [0, 7, 100_000, 2_000_001] {
            assert_eq!(parse_currency(&format_rupiah(amount)), amount);
        }
    }
}
