//! Canonical numeric normalization for compact magnitude strings.
//!
//! Market capitalisation arrives as display text ("A$220B", "A$50M"). Every
//! filter, sort and comparison path converts it through this module so that
//! bucket boundaries and winner verdicts agree. The canonical unit is
//! millions.

use crate::error::{Error, Result};

/// Multiplier for a `T` suffix, in millions.
pub const TRILLION: f64 = 1_000_000.0;
/// Multiplier for a `B` suffix, in millions.
pub const BILLION: f64 = 1_000.0;
/// Multiplier for an `M` suffix, in millions.
pub const MILLION: f64 = 1.0;
/// Multiplier for a `K` suffix, in millions.
pub const THOUSAND: f64 = 0.001;

/// Look up the multiplier for a unit suffix (case-insensitive).
///
/// An empty suffix means the number is already in millions.
fn unit_multiplier(suffix: &str) -> Option<f64> {
    match suffix.to_ascii_uppercase().as_str() {
        "" => Some(MILLION),
        "T" => Some(TRILLION),
        "B" => Some(BILLION),
        "M" => Some(MILLION),
        "K" => Some(THOUSAND),
        _ => None,
    }
}

/// Strictly parse a magnitude string into millions.
///
/// Leading currency text (anything before the first digit, sign or decimal
/// point), whitespace and thousands separators are ignored.
pub fn try_parse_magnitude(input: &str) -> Result<f64> {
    let cleaned: String = input
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .collect();

    let start = cleaned
        .find(|c: char| c.is_ascii_digit() || matches!(c, '.' | '-' | '+'))
        .ok_or_else(|| Error::malformed_magnitude(input))?;
    let body = &cleaned[start..];

    let sign_len = usize::from(body.starts_with(['-', '+']));
    let end = body[sign_len..]
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .map_or(body.len(), |i| i + sign_len);

    let number: f64 = body[..end]
        .parse()
        .map_err(|_| Error::malformed_magnitude(input))?;
    let multiplier = unit_multiplier(&body[end..]).ok_or_else(|| Error::malformed_magnitude(input))?;

    let value = number * multiplier;
    if !value.is_finite() {
        return Err(Error::malformed_magnitude(input));
    }
    Ok(value)
}

/// Leniently parse a magnitude string into millions.
///
/// Unparseable input yields `0.0`. The value is display-sourced and a bad
/// string must never take down a listing; loaders that want to report it use
/// [`try_parse_magnitude`].
#[inline]
pub fn parse_magnitude(input: &str) -> f64 {
    try_parse_magnitude(input).unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_suffixes() {
        assert_relative_eq!(parse_magnitude("A$1.2T"), 1_200_000.0, max_relative = 1e-12);
        assert_relative_eq!(parse_magnitude("A$220B"), 220_000.0, max_relative = 1e-12);
        assert_relative_eq!(parse_magnitude("A$50M"), 50.0, max_relative = 1e-12);
        assert_relative_eq!(parse_magnitude("A$999K"), 0.999, max_relative = 1e-12);
    }

    #[test]
    fn test_garbage_is_zero() {
        assert_eq!(parse_magnitude("garbage"), 0.0);
        assert_eq!(parse_magnitude(""), 0.0);
        assert_eq!(parse_magnitude("A$"), 0.0);
        assert_eq!(parse_magnitude("n.a."), 0.0);
    }

    #[test]
    fn test_case_insensitive_suffix_and_whitespace() {
        assert_relative_eq!(parse_magnitude("a$ 3.5 b"), 3_500.0, max_relative = 1e-12);
        assert_relative_eq!(parse_magnitude("US$12m"), 12.0, max_relative = 1e-12);
        assert_relative_eq!(parse_magnitude("$1,250M"), 1_250.0, max_relative = 1e-12);
    }

    #[test]
    fn test_bare_number_is_millions() {
        assert_relative_eq!(parse_magnitude("750"), 750.0, max_relative = 1e-12);
    }

    #[test]
    fn test_strict_rejects_unknown_suffix() {
        assert!(matches!(
            try_parse_magnitude("A$5X"),
            Err(Error::MalformedMagnitude(s)) if s == "A$5X"
        ));
        assert!(try_parse_magnitude("garbage").is_err());
        assert_eq!(parse_magnitude("A$5X"), 0.0);
    }
}
