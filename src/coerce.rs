// src/coerce.rs
use once_cell::sync::Lazy;
use regex::Regex;

static NON_NUMERIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^0-9.\-]+").expect("numeric scrub pattern should parse"));

/// Coerce an arbitrary cell into a finite number.
///
/// Strips every character that is not a digit, `.` or `-` (currency
/// symbols, thousands separators, footnote markers), then parses the
/// remainder. Absent, empty, or unparseable input collapses to `0.0`,
/// so a bad cell contributes nothing to downstream sums.
pub fn number(raw: Option<&str>) -> f64 {
    let Some(raw) = raw else {
        return 0.0;
    };
    let cleaned = NON_NUMERIC.replace_all(raw, "");
    match cleaned.parse::<f64>() {
        Ok(n) if n.is_finite() => n,
        _ => 0.0,
    }
}

/// Coerce an arbitrary cell into a trimmed string. Absent input is the
/// empty string, never a missing value.
pub fn text(raw: Option<&str>) -> String {
    raw.map(str::trim).unwrap_or("").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_strips_currency_noise() {
        assert_eq!(number(Some("$1,234.50")), 1234.50);
        assert_eq!(number(Some("  450 USD ")), 450.0);
        assert_eq!(number(Some("-75")), -75.0);
    }

    #[test]
    fn number_defaults_to_zero() {
        assert_eq!(number(Some("")), 0.0);
        assert_eq!(number(None), 0.0);
        assert_eq!(number(Some("   ")), 0.0);
        assert_eq!(number(Some("n/a")), 0.0);
        // two decimal points survive the scrub but fail the parse
        assert_eq!(number(Some("12.3.4")), 0.0);
    }

    #[test]
    fn text_trims_and_defaults() {
        assert_eq!(text(Some("  MV OCEAN PRIDE  ")), "MV OCEAN PRIDE");
        assert_eq!(text(Some("")), "");
        assert_eq!(text(None), "");
    }
}
