//! Eligibility filtering over the catalog
//!
//! Answers "which variants could this applicant have legally bought?" by
//! combining the sale-window and entry-age predicates. Empty results are the
//! expected "not eligible" state, never an error.

use crate::catalog::{PolicyCatalog, PolicyVariant};
use chrono::{Datelike, Local, NaiveDate};

/// Optional filters for a catalog query, applied top to bottom.
///
/// Each unset field leaves the corresponding dimension unconstrained; the
/// default query matches every variant.
#[derive(Debug, Clone, Default)]
pub struct EligibilityQuery {
    /// Restrict to a regulatory filing code
    pub identifier: Option<String>,
    /// Restrict to a retail plan name
    pub plan_name: Option<String>,
    /// Restrict to a classification tag
    pub classification: Option<String>,
    /// Require the variant to have been on sale on this date
    pub purchase_date: Option<NaiveDate>,
    /// Require the entry-age window to admit this age (completed years)
    pub entry_age: Option<f64>,
    /// Require the policy-term bounds to admit this term
    pub policy_term: Option<f64>,
    /// Require the variant to be on sale today
    pub active_today: bool,
}

/// Run a filtered query against the catalog, preserving insertion order
pub fn eligible_variants<'c>(
    catalog: &'c PolicyCatalog,
    query: &EligibilityQuery,
) -> Vec<&'c PolicyVariant> {
    let base: Vec<&PolicyVariant> = match &query.identifier {
        Some(id) => catalog.by_identifier(id),
        None => catalog.all_variants().iter().collect(),
    };

    let today = Local::now().date_naive();

    base.into_iter()
        .filter(|v| query.plan_name.as_deref().map_or(true, |name| v.plan_name == name))
        .filter(|v| {
            query
                .classification
                .as_deref()
                .map_or(true, |tag| v.classification == tag)
        })
        .filter(|v| query.purchase_date.map_or(true, |date| v.is_on_sale(date)))
        .filter(|v| query.entry_age.map_or(true, |age| v.admits_entry_age(age)))
        .filter(|v| query.policy_term.map_or(true, |term| v.admits_policy_term(term)))
        .filter(|v| !query.active_today || v.is_on_sale(today))
        .collect()
}

/// Convenience form of the common query: variants legally on sale on
/// `purchase_date` whose entry-age window admits `age`, optionally
/// pre-filtered by plan name.
pub fn resolve<'c>(
    catalog: &'c PolicyCatalog,
    purchase_date: NaiveDate,
    age: f64,
    plan_name: Option<&str>,
) -> Vec<&'c PolicyVariant> {
    eligible_variants(
        catalog,
        &EligibilityQuery {
            plan_name: plan_name.map(str::to_string),
            purchase_date: Some(purchase_date),
            entry_age: Some(age),
            ..Default::default()
        },
    )
}

/// Completed-years age at purchase: the whole-year difference between the
/// dates, decremented by one when the purchase falls before the birthday
/// anniversary within the purchase year.
///
/// A purchase date before the date of birth produces a negative value,
/// unguarded, matching the upstream data-entry behavior.
pub fn age_at_purchase(date_of_birth: NaiveDate, purchase_date: NaiveDate) -> i32 {
    let mut age = purchase_date.year() - date_of_birth.year();
    if (purchase_date.month(), purchase_date.day()) < (date_of_birth.month(), date_of_birth.day()) {
        age -= 1;
    }
    age
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::test_support::variant;
    use crate::catalog::BoundValue;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn catalog() -> PolicyCatalog {
        let v1 = variant("512N100V01", "Secure Endowment");
        let mut v2 = variant("512N200V01", "Child Future");
        v2.classification = "Module 4".to_string();
        v2.min_entry_age = BoundValue::Text("90 Days".to_string());
        v2.max_entry_age = BoundValue::Number(12.0);
        let mut v3 = variant("512N300V01", "Retired Window");
        v3.valid_from = date(2000, 1, 1);
        v3.valid_to = Some(date(2005, 12, 31));
        PolicyCatalog::new(vec![v1, v2, v3]).unwrap()
    }

    #[test]
    fn test_resolve_filters_window_and_age() {
        let c = catalog();
        let hits = resolve(&c, date(2024, 6, 1), 30.0, None);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].identifier, "512N100V01");

        // Inside the retired plan's window only that variant matches
        let hits = resolve(&c, date(2004, 6, 1), 30.0, None);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].identifier, "512N300V01");
    }

    #[test]
    fn test_resolve_plan_name_filter() {
        let c = catalog();
        let hits = resolve(&c, date(2024, 6, 1), 5.0, Some("Child Future"));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].identifier, "512N200V01");

        assert!(resolve(&c, date(2024, 6, 1), 5.0, Some("Secure Endowment")).is_empty());
    }

    #[test]
    fn test_zero_age_carve_out_applies() {
        let c = catalog();
        // Age 0 admitted by the day-based minimum on Child Future
        let hits = resolve(&c, date(2024, 6, 1), 0.0, None);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].identifier, "512N200V01");
    }

    #[test]
    fn test_eligibility_monotonic_inside_windows() {
        let c = catalog();
        // Eligible at the boundary implies eligible strictly inside
        for age in [18.0, 25.0, 40.0, 60.0] {
            for d in [date(2014, 1, 1), date(2020, 6, 15), date(2030, 12, 31)] {
                let hits = resolve(&c, d, age, Some("Secure Endowment"));
                assert_eq!(hits.len(), 1, "age {} date {} should stay eligible", age, d);
            }
        }
    }

    #[test]
    fn test_no_eligible_variants_is_empty_not_error() {
        let c = catalog();
        assert!(resolve(&c, date(1990, 1, 1), 30.0, None).is_empty());
        assert!(resolve(&c, date(2024, 1, 1), 99.0, None).is_empty());
    }

    #[test]
    fn test_general_query_filters() {
        let c = catalog();

        let by_class = eligible_variants(
            &c,
            &EligibilityQuery {
                classification: Some("Module 4".to_string()),
                ..Default::default()
            },
        );
        assert_eq!(by_class.len(), 1);
        assert_eq!(by_class[0].identifier, "512N200V01");

        let by_term = eligible_variants(
            &c,
            &EligibilityQuery {
                plan_name: Some("Secure Endowment".to_string()),
                policy_term: Some(15.0),
                ..Default::default()
            },
        );
        assert_eq!(by_term.len(), 1);

        let by_term = eligible_variants(
            &c,
            &EligibilityQuery {
                plan_name: Some("Secure Endowment".to_string()),
                policy_term: Some(25.0),
                ..Default::default()
            },
        );
        assert!(by_term.is_empty());

        let by_id = eligible_variants(
            &c,
            &EligibilityQuery {
                identifier: Some("512N300V01".to_string()),
                ..Default::default()
            },
        );
        assert_eq!(by_id.len(), 1);
    }

    #[test]
    fn test_age_at_purchase_birthday_boundary() {
        let dob = date(1990, 6, 15);
        assert_eq!(age_at_purchase(dob, date(2024, 6, 14)), 33);
        assert_eq!(age_at_purchase(dob, date(2024, 6, 15)), 34);
        assert_eq!(age_at_purchase(dob, date(2024, 6, 16)), 34);
    }

    #[test]
    fn test_age_at_purchase_year_boundaries() {
        let dob = date(2000, 12, 31);
        assert_eq!(age_at_purchase(dob, date(2024, 12, 30)), 23);
        assert_eq!(age_at_purchase(dob, date(2024, 12, 31)), 24);
        assert_eq!(age_at_purchase(dob, date(2025, 1, 1)), 24);

        // Under one year reports 0 completed years
        assert_eq!(age_at_purchase(date(2024, 1, 10), date(2024, 11, 1)), 0);
    }

    #[test]
    fn test_age_at_purchase_leap_day_birth() {
        let dob = date(2000, 2, 29);
        // In a non-leap year the anniversary has not occurred on Feb 28
        assert_eq!(age_at_purchase(dob, date(2023, 2, 28)), 22);
        assert_eq!(age_at_purchase(dob, date(2023, 3, 1)), 23);
    }

    #[test]
    fn test_age_at_purchase_before_birth_goes_negative() {
        // Propagated unguarded; callers see the negative value
        assert_eq!(age_at_purchase(date(2000, 6, 15), date(1999, 6, 15)), -1);
    }
}
