//! Sum-assured validation against variant limits
//!
//! The one piece of user input with a real error taxonomy: below minimum,
//! above maximum, or not on the required multiple. Rules are checked in that
//! order and only the first violation is reported, as a display-ready
//! message with Indian-format rupee amounts.

use crate::catalog::{PolicyVariant, SumAssuredLimit};

/// Outcome of a sum-assured check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SumAssuredCheck {
    Ok,
    /// First failing rule, as a user-facing message
    Violation(String),
}

impl SumAssuredCheck {
    pub fn is_ok(&self) -> bool {
        matches!(self, SumAssuredCheck::Ok)
    }
}

/// Validate a candidate amount against the variant's limits.
///
/// Absent limits do not constrain; a "No Limit" maximum never fails.
pub fn validate_sum_assured(variant: &PolicyVariant, amount: u64) -> SumAssuredCheck {
    if let Some(min) = variant.min_sum_assured {
        if amount < min {
            return SumAssuredCheck::Violation(format!(
                "Minimum sum assured is ₹{}",
                format_inr(min)
            ));
        }
    }

    if let Some(SumAssuredLimit::Amount(max)) = variant.max_sum_assured {
        if amount > max {
            return SumAssuredCheck::Violation(format!(
                "Maximum sum assured is ₹{}",
                format_inr(max)
            ));
        }
    }

    if let Some(multiple) = variant.sum_assured_multiples {
        if multiple > 0 && amount % multiple != 0 {
            return SumAssuredCheck::Violation(format!(
                "Sum assured must be in multiples of ₹{}",
                format_inr(multiple)
            ));
        }
    }

    SumAssuredCheck::Ok
}

/// Format an amount with Indian digit grouping (1,00,00,000)
pub fn format_inr(amount: u64) -> String {
    let digits = amount.to_string();
    if digits.len() <= 3 {
        return digits;
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<String> = Vec::new();
    let head_bytes = head.as_bytes();
    let mut i = head_bytes.len();
    while i > 0 {
        let start = i.saturating_sub(2);
        groups.push(head[start..i].to_string());
        i = start;
    }
    groups.reverse();
    format!("{},{}", groups.join(","), tail)
}
