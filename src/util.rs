// Utility helpers for parsing, rounding, and number formatting.
//
// This module centralizes the "dirty" number handling so the rest of the
// code can assume clean, typed values.
use num_format::{Locale, ToFormattedString};

/// Parse a display cost like `$2.5M` or `$1,200,000` into dollars.
///
/// - Strips `$` and thousands separators.
/// - A trailing `M` multiplies by one million.
/// - Returns `None` for anything that cannot be safely parsed.
pub fn parse_dollars(s: &str) -> Option<f64> {
    let s = s.trim().trim_start_matches('$').replace(',', "");
    if s.is_empty() {
        return None;
    }
    if let Some(millions) = s.strip_suffix('M') {
        return millions.parse::<f64>().ok().map(|v| v * 1_000_000.0);
    }
    s.parse::<f64>().ok()
}

/// Format a dollar amount back into the `$X.YM` display form.
pub fn format_millions(dollars: f64) -> String {
    format!("${:.1}M", dollars / 1_000_000.0)
}

/// Round to one decimal place, the precision used for all category scores.
pub fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

pub fn format_int<T>(n: T) -> String
where
    T: ToFormattedString,
{
    // Thin wrapper around `num-format` for integer-like values. This is used
    // for counts in console messages (e.g., `1,248 responses loaded`).
    n.to_formatted_string(&Locale::en)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_display_costs() {
        assert_eq!(parse_dollars("$2.5M"), Some(2_500_000.0));
        assert_eq!(parse_dollars("$1,200,000"), Some(1_200_000.0));
        assert_eq!(parse_dollars("1.8M"), Some(1_800_000.0));
        assert_eq!(parse_dollars(""), None);
        assert_eq!(parse_dollars("$"), None);
    }

    #[test]
    fn rounds_to_one_decimal() {
        assert_eq!(round1(3.14), 3.1);
        assert_eq!(round1(3.16), 3.2);
        assert_eq!(round1(3.25), 3.3);
        assert_eq!(round1(0.0), 0.0);
    }

    #[test]
    fn formats_with_separators() {
        assert_eq!(format_int(1_234_567i64), "1,234,567");
    }
}
