//! Policy variant data structures matching the catalog master-data format

use crate::normalize::{age_years, is_day_based, term_years};
use crate::ppt::PremiumTermRule;
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// A catalog bound that may be encoded as a number or a unit-carrying string
/// ("18", "90 Days", "40 Year"). The raw encoding is preserved; comparisons
/// go through the normalization rules in [`crate::normalize`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BoundValue {
    Number(f64),
    Text(String),
}

impl From<f64> for BoundValue {
    fn from(n: f64) -> Self {
        BoundValue::Number(n)
    }
}

impl From<&str> for BoundValue {
    fn from(s: &str) -> Self {
        BoundValue::Text(s.to_string())
    }
}

/// Upper sum-assured limit; some filings cap it, others declare "No Limit"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SumAssuredLimit {
    /// Hard cap in rupees
    Amount(u64),
    /// Explicitly uncapped
    NoLimit,
}

/// One dated regulatory filing of a retail insurance plan.
///
/// Several variants can share a `plan_name` (successive filings of the same
/// product) while carrying different entry-age windows, term bounds, and
/// premium-paying-term rules. The catalog is a frozen reference dataset;
/// variants are never created or mutated at runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyVariant {
    /// Unique regulatory filing code (UIN)
    pub identifier: String,

    /// Retail-facing product name
    pub plan_name: String,

    /// Module tag determining the downstream question set
    pub classification: String,

    /// Start of the regulatory sale window
    pub valid_from: NaiveDate,

    /// End of the sale window; `None` means still on sale
    pub valid_to: Option<NaiveDate>,

    /// Inclusive minimum entry age (years or days, see normalization)
    pub min_entry_age: BoundValue,

    /// Inclusive maximum entry age
    pub max_entry_age: BoundValue,

    /// Inclusive minimum policy term in years (non-age-linked variants only)
    pub min_policy_term: BoundValue,

    /// Inclusive maximum policy term in years
    pub max_policy_term: BoundValue,

    /// Minimum applicant age at contract end, when constrained
    pub min_age_at_maturity: Option<i32>,

    /// Maximum applicant age at contract end, when constrained
    pub max_age_at_maturity: Option<i32>,

    /// Parsed premium-paying-term rule
    pub premium_paying_term: PremiumTermRule,

    /// Raw PPT spec string as filed, kept for display and debugging
    pub premium_paying_term_raw: String,

    /// Minimum selectable sum assured
    pub min_sum_assured: Option<u64>,

    /// Maximum selectable sum assured
    pub max_sum_assured: Option<SumAssuredLimit>,

    /// Required sum-assured granularity
    pub sum_assured_multiples: Option<u64>,
}

impl PolicyVariant {
    /// Whether this variant was legally on sale on `date`.
    ///
    /// An absent `valid_to` compares against the wall-clock date at call
    /// time, not a fixed sentinel.
    pub fn is_on_sale(&self, date: NaiveDate) -> bool {
        let to = self.valid_to.unwrap_or_else(|| Local::now().date_naive());
        if self.valid_from > to {
            return false;
        }
        date >= self.valid_from && date <= to
    }

    /// Whether the entry-age window admits an applicant of `age` years.
    ///
    /// Carve-out: an applicant whose age rounds to 0 years is always
    /// admitted when the minimum entry age is day-based, since completed-year
    /// age arithmetic reports 0 for anyone under one year old regardless of
    /// their exact day count.
    pub fn admits_entry_age(&self, age: f64) -> bool {
        if age == 0.0 && is_day_based(&self.min_entry_age) {
            return true;
        }
        age >= age_years(&self.min_entry_age) && age <= age_years(&self.max_entry_age)
    }

    /// Whether `term` (years) is within the variant's policy-term bounds
    pub fn admits_policy_term(&self, term: f64) -> bool {
        term >= term_years(&self.min_policy_term) && term <= term_years(&self.max_policy_term)
    }

    /// Whether an age-at-maturity satisfies the variant's maturity bounds
    /// (absent bounds do not constrain)
    pub fn maturity_age_ok(&self, maturity_age: f64) -> bool {
        if let Some(min) = self.min_age_at_maturity {
            if maturity_age < min as f64 {
                return false;
            }
        }
        if let Some(max) = self.max_age_at_maturity {
            if maturity_age > max as f64 {
                return false;
            }
        }
        true
    }
}
