//! Policy-term option enumeration
//!
//! For a chosen plan, age, and purchase date, derives every whole-year term
//! the applicant may legally select, unioned across the plan's eligible
//! variants. Age-linked plans derive terms from target maturity ages; all
//! other plans use their stated term bounds tightened by any maturity-age
//! constraints.

use crate::catalog::{PolicyCatalog, PolicyVariant};
use crate::normalize::term_years;
use crate::variant::is_age_linked;
use chrono::NaiveDate;
use std::collections::BTreeSet;

/// Leniency on the upper maturity-age bound for fixed-term products only
const FIXED_TERM_MATURITY_GRACE: i64 = 5;

/// Enumerate the legal policy-term choices in ascending order.
///
/// Returns an empty sequence when no variant of the plan admits the
/// applicant's age and purchase date; callers render that as a "no options"
/// state, not an error.
pub fn term_options(
    catalog: &PolicyCatalog,
    plan_name: &str,
    age_at_purchase: f64,
    purchase_date: NaiveDate,
) -> Vec<u32> {
    let eligible: Vec<&PolicyVariant> = catalog
        .by_plan_name(plan_name)
        .into_iter()
        .filter(|v| v.admits_entry_age(age_at_purchase) && v.is_on_sale(purchase_date))
        .collect();

    let Some(first) = eligible.first() else {
        return Vec::new();
    };

    let rounded_age = age_at_purchase.round() as i64;
    let mut terms: BTreeSet<i64> = BTreeSet::new();

    if is_age_linked(&first.identifier) {
        for v in &eligible {
            collect_age_linked_terms(v, rounded_age, &mut terms);
        }
    } else {
        for v in &eligible {
            collect_ranged_terms(v, rounded_age, &mut terms);
        }
    }

    terms.into_iter().filter(|&t| t > 0).map(|t| t as u32).collect()
}

/// Age-linked family: each selectable term is a target maturity age minus
/// the applicant's rounded age. The applicant must be able to reach at least
/// one year beyond their current age.
fn collect_age_linked_terms(v: &PolicyVariant, rounded_age: i64, terms: &mut BTreeSet<i64>) {
    let (Some(min_maturity), Some(max_maturity)) = (v.min_age_at_maturity, v.max_age_at_maturity)
    else {
        return;
    };

    let min_target = (min_maturity as i64).max(rounded_age + 1);
    for target_age in min_target..=max_maturity as i64 {
        let term = target_age - rounded_age;
        if term > 0 {
            terms.insert(term);
        }
    }
}

/// Regular family: the stated term range, tightened by maturity-age bounds.
/// Fixed-term filings (min == max) get a single term with a relaxed upper
/// maturity check.
fn collect_ranged_terms(v: &PolicyVariant, rounded_age: i64, terms: &mut BTreeSet<i64>) {
    let min_term = term_years(&v.min_policy_term);
    let max_term = term_years(&v.max_policy_term);

    if min_term == max_term {
        let term = min_term.round() as i64;
        let maturity_age = rounded_age + term;
        let min_ok = v
            .min_age_at_maturity
            .map_or(true, |m| maturity_age >= m as i64);
        let max_ok = v
            .max_age_at_maturity
            .map_or(true, |m| maturity_age <= m as i64 + FIXED_TERM_MATURITY_GRACE);
        if min_ok && max_ok {
            terms.insert(term);
        }
        return;
    }

    let mut valid_min = min_term;
    let mut valid_max = max_term;
    if let Some(m) = v.min_age_at_maturity {
        valid_min = valid_min.max((m as f64 - rounded_age as f64).ceil());
    }
    if let Some(m) = v.max_age_at_maturity {
        valid_max = valid_max.min((m as f64 - rounded_age as f64).floor());
    }
    let valid_min = valid_min.ceil() as i64;
    let valid_max = valid_max.floor() as i64;

    if valid_min <= valid_max && valid_min > 0 {
        for term in valid_min..=valid_max {
            terms.insert(term);
        }
    }
}
