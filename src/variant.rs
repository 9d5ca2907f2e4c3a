//! Variant selection: picking the single governing filing of a plan
//!
//! Successive filings of the same retail plan share a name but can carry
//! different term bounds and premium-paying-term rules, so "which variant
//! applies" has two answers: a provisional best match made before a policy
//! term is known (used only to classify the plan), and the authoritative
//! term-aware selection made once the applicant picks a term.

use crate::catalog::{PolicyCatalog, PolicyVariant};
use crate::eligibility::{age_at_purchase, resolve};
use chrono::NaiveDate;

/// Filing codes of the age-linked product family: annuity-style plans whose
/// policy term is derived from a target maturity age rather than stated
/// directly. Detection is by this allow-list; a new age-linked filing must
/// be added here or it falls into the regular-family branch.
pub const AGE_LINKED_IDENTIFIERS: [&str; 3] = ["512N296V02", "512N312V01", "512N312V02"];

/// Whether a filing code belongs to the age-linked family
pub fn is_age_linked(identifier: &str) -> bool {
    AGE_LINKED_IDENTIFIERS.contains(&identifier)
}

/// Outcome of a provisional best-match resolution
#[derive(Debug, Clone)]
pub struct BestMatch<'c> {
    /// The latest-filed eligible variant, when one exists
    pub variant: Option<&'c PolicyVariant>,
    /// Human-readable reasons when no variant matched
    pub reasons: Vec<String>,
}

impl BestMatch<'_> {
    pub fn is_eligible(&self) -> bool {
        self.variant.is_some()
    }
}

/// Find the most recent variant the applicant was eligible for.
///
/// This is a provisional match made before a policy term is chosen, used to
/// classify the plan; [`select_by_term`] supersedes it once a term is known.
/// When several eligible variants exist, the one with the latest
/// `valid_from` wins (ties keep catalog order).
pub fn find_best_match<'c>(
    catalog: &'c PolicyCatalog,
    date_of_birth: NaiveDate,
    purchase_date: NaiveDate,
    plan_name: Option<&str>,
) -> BestMatch<'c> {
    let age = age_at_purchase(date_of_birth, purchase_date) as f64;
    let eligible = resolve(catalog, purchase_date, age, plan_name);

    if eligible.is_empty() {
        let reason = match plan_name {
            None => "No policies available for your purchase date and age".to_string(),
            Some(name) => format!("{} is not available for your purchase date or age", name),
        };
        return BestMatch { variant: None, reasons: vec![reason] };
    }

    let mut best = eligible[0];
    for v in &eligible[1..] {
        if v.valid_from > best.valid_from {
            best = v;
        }
    }
    BestMatch { variant: Some(best), reasons: Vec::new() }
}

/// Authoritative variant resolution once a policy term is chosen.
///
/// Age-linked plans match on entry age, sale window, and the maturity age
/// implied by `age + term`; regular plans additionally require the term to
/// fall within the variant's own term bounds. The first matching variant in
/// catalog order is returned. `None` means no filing governs this term and
/// the caller falls back to the provisional match, never a hard error.
pub fn select_by_term<'c>(
    catalog: &'c PolicyCatalog,
    plan_name: &str,
    policy_term: u32,
    age_at_purchase: f64,
    purchase_date: NaiveDate,
) -> Option<&'c PolicyVariant> {
    let variants = catalog.by_plan_name(plan_name);
    if variants.is_empty() {
        return None;
    }
    // Family detection follows the plan's first filing, as every filing of
    // an age-linked plan shares the family
    let age_linked = is_age_linked(&variants[0].identifier);

    let maturity_age = age_at_purchase + policy_term as f64;

    if age_linked {
        variants.into_iter().find(|v| {
            v.admits_entry_age(age_at_purchase)
                && v.is_on_sale(purchase_date)
                && v.maturity_age_ok(maturity_age)
        })
    } else {
        variants.into_iter().find(|v| {
            v.admits_entry_age(age_at_purchase)
                && v.is_on_sale(purchase_date)
                && v.admits_policy_term(policy_term as f64)
                && v.maturity_age_ok(maturity_age)
        })
    }
}
