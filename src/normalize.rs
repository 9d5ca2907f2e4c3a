//! Age and term normalization for heterogeneous catalog encodings
//!
//! Catalog bounds arrive as plain numbers ("18"), year strings ("40 Year"),
//! or day strings ("90 Days"). Everything is reduced to a single unit of
//! fractional years before any eligibility comparison.

use crate::catalog::BoundValue;
use log::warn;

/// Days-per-year divisor used for day-based encodings
const DAYS_PER_YEAR: f64 = 365.0;

/// Default day count applied when a day-based string carries no digits
const FALLBACK_DAYS: f64 = 90.0;

/// Result of a normalization, carrying a diagnostic flag so callers can
/// distinguish an explicit zero from the defensive fallback taken on an
/// unparseable string.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normalized {
    /// Value in years (fractional for day-based encodings)
    pub years: f64,
    /// True when the raw value had no digits and a default was substituted
    pub fell_back: bool,
}

impl Normalized {
    fn exact(years: f64) -> Self {
        Self { years, fell_back: false }
    }

    fn fallback(years: f64) -> Self {
        Self { years, fell_back: true }
    }
}

/// Extract the leading run of digits from a string, if any
fn leading_digits(s: &str) -> Option<u32> {
    let digits: String = s
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

/// Whether a raw bound is expressed in days ("90 Days", "90 days")
pub fn is_day_based(raw: &BoundValue) -> bool {
    match raw {
        BoundValue::Number(_) => false,
        BoundValue::Text(s) => s.to_lowercase().contains("day"),
    }
}

/// Normalize an entry-age bound to fractional years.
///
/// Numbers pass through unchanged. Day strings divide the leading integer
/// by 365; year strings take the leading integer as whole years. A string
/// with no digits falls back to 90 days (~0.25 years) and sets the
/// diagnostic flag.
pub fn normalize_age(raw: &BoundValue) -> Normalized {
    match raw {
        BoundValue::Number(n) => Normalized::exact(*n),
        BoundValue::Text(s) => {
            if s.to_lowercase().contains("day") {
                match leading_digits(s) {
                    Some(days) => Normalized::exact(days as f64 / DAYS_PER_YEAR),
                    None => {
                        warn!("age bound {:?} has no digits, defaulting to {} days", s, FALLBACK_DAYS);
                        Normalized::fallback(FALLBACK_DAYS / DAYS_PER_YEAR)
                    }
                }
            } else {
                match leading_digits(s) {
                    Some(years) => Normalized::exact(years as f64),
                    None => {
                        warn!("age bound {:?} has no digits, defaulting to {} days", s, FALLBACK_DAYS);
                        Normalized::fallback(FALLBACK_DAYS / DAYS_PER_YEAR)
                    }
                }
            }
        }
    }
}

/// Normalize a policy-term bound to years.
///
/// Numeric terms in the catalog are always already years and are rounded to
/// the nearest integer. Strings convert via the days rule only when they
/// explicitly contain "day"; otherwise the leading integer is taken as whole
/// years. A string with no digits falls back to 0 and sets the diagnostic
/// flag.
pub fn normalize_term(raw: &BoundValue) -> Normalized {
    match raw {
        BoundValue::Number(n) => Normalized::exact(n.round()),
        BoundValue::Text(s) => {
            if s.to_lowercase().contains("day") {
                let days = leading_digits(s).map(|d| d as f64).unwrap_or(FALLBACK_DAYS);
                Normalized::exact(days / DAYS_PER_YEAR)
            } else {
                match leading_digits(s) {
                    Some(years) => Normalized::exact(years as f64),
                    None => {
                        warn!("term bound {:?} has no digits, defaulting to 0", s);
                        Normalized::fallback(0.0)
                    }
                }
            }
        }
    }
}

/// Convenience accessor for the numeric age value only
pub fn age_years(raw: &BoundValue) -> f64 {
    normalize_age(raw).years
}

/// Convenience accessor for the numeric term value only
pub fn term_years(raw: &BoundValue) -> f64 {
    normalize_term(raw).years
}
