//! format.rs
//! Locale-aware beautification of metric values.
//!
//! Figures on cards are rounded to three significant digits and grouped
//! with the locale's separators. The output depends on the locale passed
//! in and on nothing else, so for a fixed locale the formatting is fully
//! deterministic.

/// Separator set of one display locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Locale {
    pub decimal: char,
    pub group: Option<char>,
}

impl Locale {
    pub const EN: Locale = Locale { decimal: '.', group: Some(',') };
    /// Finnish and Swedish group with a non-breaking space.
    pub const FI: Locale = Locale { decimal: ',', group: Some('\u{a0}') };
    pub const SV: Locale = Locale { decimal: ',', group: Some('\u{a0}') };
    pub const DE: Locale = Locale { decimal: ',', group: Some('.') };
}

const SIGNIFICANT_DIGITS: i32 = 3;

/// Formats a value to three significant digits with locale separators.
///
/// Trailing fraction zeros are dropped (`1.50` renders as `1,5` in FI).
/// Non-finite values pass through as their plain `Display` form; there is
/// nothing meaningful to group in `inf`.
pub fn beautify_value(x: f64, locale: &Locale) -> String {
    if !x.is_finite() {
        return x.to_string();
    }
    if x == 0.0 {
        return "0".to_string();
    }

    let exponent = x.abs().log10().floor() as i32;
    let decimals = (SIGNIFICANT_DIGITS - 1 - exponent).max(0);
    let scale = 10f64.powi(SIGNIFICANT_DIGITS - 1 - exponent);
    let rounded = (x * scale).round() / scale;

    let raw = format!("{:.*}", decimals as usize, rounded);
    let (sign, unsigned) = match raw.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", raw.as_str()),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, f.trim_end_matches('0')),
        None => (unsigned, ""),
    };

    let mut out = String::with_capacity(raw.len() + 4);
    out.push_str(sign);
    push_grouped(&mut out, int_part, locale.group);
    if !frac_part.is_empty() {
        out.push(locale.decimal);
        out.push_str(frac_part);
    }
    out
}

fn push_grouped(out: &mut String, digits: &str, group: Option<char>) {
    let Some(sep) = group else {
        out.push_str(digits);
        return;
    };
    let len = digits.len();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(sep);
        }
        out.push(ch);
    }
}

/// Renders a rounded percent change the way the status rows do: explicit
/// sign, `-` placeholder when there is no change to show (including a
/// zero change, which the cards treat as "nothing to report").
pub fn format_signed_percent(change: Option<i64>) -> String {
    match change {
        Some(c) if c > 0 => format!("+{c}%"),
        Some(c) if c < 0 => format!("{c}%"),
        _ => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(12345.6, "12,300")]
    #[case(1000.0, "1,000")]
    #[case(999.9, "1,000")] // rounding bumps into the next magnitude
    #[case(123.456, "123")]
    #[case(12.345, "12.3")]
    #[case(1.5, "1.5")]
    #[case(0.1234, "0.123")]
    #[case(0.000_123_4, "0.000123")]
    #[case(-12345.6, "-12,300")]
    #[case(0.0, "0")]
    #[case(2_000_000.0, "2,000,000")]
    fn test_beautify_en(#[case] x: f64, #[case] expected: &str) {
        assert_eq!(beautify_value(x, &Locale::EN), expected);
    }

    #[rstest]
    #[case(12345.6, "12\u{a0}300")]
    #[case(1.5, "1,5")]
    #[case(0.1234, "0,123")]
    fn test_beautify_fi(#[case] x: f64, #[case] expected: &str) {
        assert_eq!(beautify_value(x, &Locale::FI), expected);
    }

    #[test]
    fn test_beautify_de_groups_with_dot() {
        assert_eq!(beautify_value(12345.6, &Locale::DE), "12.300");
        assert_eq!(beautify_value(1.5, &Locale::DE), "1,5");
    }

    #[test]
    fn test_beautify_non_finite_passthrough() {
        assert_eq!(beautify_value(f64::INFINITY, &Locale::EN), "inf");
        assert_eq!(beautify_value(f64::NAN, &Locale::EN), "NaN");
    }

    #[rstest]
    #[case(Some(50), "+50%")]
    #[case(Some(-50), "-50%")]
    #[case(Some(0), "-")]
    #[case(None, "-")]
    fn test_format_signed_percent(#[case] change: Option<i64>, #[case] expected: &str) {
        assert_eq!(format_signed_percent(change), expected);
    }
}
