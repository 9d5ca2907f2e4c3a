//! Form-flow facade over the catalog and resolvers
//!
//! One [`ReviewService`] is constructed at process start around an immutable
//! catalog and handed by reference into each step of the question flow:
//! birth date, purchase date, plan choice, term choice, sum assured. Every
//! operation is a pure read; the service is safe to share across concurrent
//! sessions without locking.

use crate::catalog::{CatalogError, PolicyCatalog, PolicyVariant};
use crate::eligibility::{self, EligibilityQuery};
use crate::ppt::{self, PptOption};
use crate::sum_assured::{self, SumAssuredCheck};
use crate::terms;
use crate::variant::{self, BestMatch};
use chrono::NaiveDate;
use std::collections::BTreeSet;
use std::path::Path;

/// The applicant's answers so far; parameterizes queries and is never
/// persisted by the engine.
#[derive(Debug, Clone)]
pub struct ApplicantContext {
    pub date_of_birth: NaiveDate,
    pub purchase_date: NaiveDate,
    pub plan_name: Option<String>,
    pub policy_term: Option<u32>,
}

impl ApplicantContext {
    /// Completed-years age on the purchase date
    pub fn age_at_purchase(&self) -> i32 {
        eligibility::age_at_purchase(self.date_of_birth, self.purchase_date)
    }
}

/// Read-only policy review service owning the indexed catalog
#[derive(Debug, Clone)]
pub struct ReviewService {
    catalog: PolicyCatalog,
}

impl ReviewService {
    pub fn new(catalog: PolicyCatalog) -> Self {
        Self { catalog }
    }

    /// Load the catalog from a master-data JSON file
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        Ok(Self::new(crate::catalog::load_catalog(path)?))
    }

    pub fn catalog(&self) -> &PolicyCatalog {
        &self.catalog
    }

    /// Every plan name in the catalog, sorted
    pub fn list_plan_names(&self) -> Vec<String> {
        self.catalog.unique_plan_names()
    }

    /// Plan names with at least one variant the applicant could have bought
    pub fn eligible_plan_names(&self, date_of_birth: NaiveDate, purchase_date: NaiveDate) -> Vec<String> {
        let age = eligibility::age_at_purchase(date_of_birth, purchase_date) as f64;
        let names: BTreeSet<String> = eligibility::resolve(&self.catalog, purchase_date, age, None)
            .into_iter()
            .map(|v| v.plan_name.clone())
            .collect();
        names.into_iter().collect()
    }

    /// Classification tag of a plan, via the provisional best match.
    /// `None` means the plan had no eligible variant for these dates.
    pub fn classify_plan(
        &self,
        plan_name: &str,
        date_of_birth: NaiveDate,
        purchase_date: NaiveDate,
    ) -> Option<String> {
        self.find_best_match(date_of_birth, purchase_date, Some(plan_name))
            .variant
            .map(|v| v.classification.clone())
    }

    /// Provisional latest-filing match, made before a term is chosen
    pub fn find_best_match(
        &self,
        date_of_birth: NaiveDate,
        purchase_date: NaiveDate,
        plan_name: Option<&str>,
    ) -> BestMatch<'_> {
        variant::find_best_match(&self.catalog, date_of_birth, purchase_date, plan_name)
    }

    /// General filtered query over the catalog
    pub fn eligible_variants(&self, query: &EligibilityQuery) -> Vec<&PolicyVariant> {
        eligibility::eligible_variants(&self.catalog, query)
    }

    /// Legal policy-term choices for a plan, sorted ascending
    pub fn term_options(&self, plan_name: &str, age_at_purchase: f64, purchase_date: NaiveDate) -> Vec<u32> {
        terms::term_options(&self.catalog, plan_name, age_at_purchase, purchase_date)
    }

    /// Authoritative variant for a chosen term; `None` means the caller
    /// falls back to the provisional best match
    pub fn resolve_variant(
        &self,
        plan_name: &str,
        policy_term: u32,
        age_at_purchase: f64,
        purchase_date: NaiveDate,
    ) -> Option<&PolicyVariant> {
        variant::select_by_term(&self.catalog, plan_name, policy_term, age_at_purchase, purchase_date)
    }

    /// Selectable premium-paying-term options for a resolved variant.
    /// No variant or no recognized PPT rule yields no options.
    pub fn ppt_options(&self, variant: Option<&PolicyVariant>, policy_term: Option<u32>) -> Vec<PptOption> {
        match variant {
            Some(v) => ppt::ppt_options(&v.premium_paying_term, policy_term),
            None => Vec::new(),
        }
    }

    /// Whether the PPT selection step applies to this variant at all
    pub fn should_show_ppt_field(&self, variant: &PolicyVariant) -> bool {
        ppt::should_show_ppt_field(&variant.premium_paying_term)
    }

    /// Validate a candidate sum assured against the variant's limits
    pub fn validate_sum_assured(&self, variant: &PolicyVariant, amount: u64) -> SumAssuredCheck {
        sum_assured::validate_sum_assured(variant, amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::test_support::variant;
    use crate::catalog::BoundValue;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn service() -> ReviewService {
        let mut endow_old = variant("512N100V01", "Secure Endowment");
        endow_old.valid_from = date(2010, 1, 1);
        endow_old.valid_to = Some(date(2019, 12, 31));
        let mut endow_new = variant("512N100V02", "Secure Endowment");
        endow_new.valid_from = date(2020, 1, 1);

        let mut child = variant("512N200V01", "Child Future");
        child.classification = "Module 4".to_string();
        child.min_entry_age = BoundValue::Text("90 Days".to_string());
        child.max_entry_age = BoundValue::Number(12.0);

        let mut annuity = variant("512N312V01", "Deferred Annuity");
        annuity.classification = "Module 5".to_string();
        annuity.min_entry_age = 30.0.into();
        annuity.max_entry_age = 79.0.into();
        annuity.min_age_at_maturity = Some(60);
        annuity.max_age_at_maturity = Some(80);
        annuity.premium_paying_term = crate::ppt::PremiumTermRule::SinglePremium;
        annuity.premium_paying_term_raw = "1".to_string();

        ReviewService::new(PolicyCatalog::new(vec![endow_old, endow_new, child, annuity]).unwrap())
    }

    #[test]
    fn test_list_and_eligible_plan_names() {
        let svc = service();
        assert_eq!(
            svc.list_plan_names(),
            vec!["Child Future", "Deferred Annuity", "Secure Endowment"]
        );

        // A 34-year-old in 2024: endowment and annuity, not the child plan
        let names = svc.eligible_plan_names(date(1990, 6, 15), date(2024, 8, 1));
        assert_eq!(names, vec!["Deferred Annuity", "Secure Endowment"]);

        // Purchase predates every window
        assert!(svc.eligible_plan_names(date(1960, 1, 1), date(1980, 1, 1)).is_empty());
    }

    #[test]
    fn test_classify_plan() {
        let svc = service();
        assert_eq!(
            svc.classify_plan("Child Future", date(2020, 3, 1), date(2024, 8, 1)),
            Some("Module 4".to_string())
        );
        assert_eq!(
            svc.classify_plan("Secure Endowment", date(1990, 6, 15), date(2024, 8, 1)),
            Some("Module 3".to_string())
        );
        // Adult is outside the child plan's entry window
        assert_eq!(svc.classify_plan("Child Future", date(1990, 6, 15), date(2024, 8, 1)), None);
        assert_eq!(svc.classify_plan("No Such Plan", date(1990, 6, 15), date(2024, 8, 1)), None);
    }

    #[test]
    fn test_full_flow_regular_plan() {
        let svc = service();
        let dob = date(1990, 6, 15);
        let purchase = date(2024, 8, 1);
        let age = eligibility::age_at_purchase(dob, purchase) as f64;
        assert_eq!(age, 34.0);

        let terms = svc.term_options("Secure Endowment", age, purchase);
        assert_eq!(terms, (10..=20).collect::<Vec<u32>>());

        let v = svc.resolve_variant("Secure Endowment", 15, age, purchase).unwrap();
        // Purchase in 2024 falls in the newer filing's window
        assert_eq!(v.identifier, "512N100V02");

        let opts = svc.ppt_options(Some(v), Some(15));
        assert_eq!(opts.len(), 1);
        assert_eq!(opts[0].value, 15);

        assert!(svc.validate_sum_assured(v, 250_000).is_ok());
    }

    #[test]
    fn test_full_flow_age_linked_plan() {
        let svc = service();
        let purchase = date(2024, 8, 1);
        let age = 40.0;

        // Maturity floor 60 dominates age+1=41, so target ages 60..=80
        let terms = svc.term_options("Deferred Annuity", age, purchase);
        assert_eq!(terms, (20..=40).collect::<Vec<u32>>());

        let v = svc.resolve_variant("Deferred Annuity", 25, age, purchase).unwrap();
        assert_eq!(v.identifier, "512N312V01");
        assert!(svc.should_show_ppt_field(v));

        let opts = svc.ppt_options(Some(v), Some(25));
        assert_eq!(opts.len(), 1);
        assert_eq!(opts[0].value, 1);
        assert_eq!(opts[0].label, "1 year (Single Premium)");
    }

    #[test]
    fn test_resolve_variant_fallback_contract() {
        let svc = service();
        // Term 30 exceeds every endowment filing; the caller is expected to
        // fall back to the provisional best match
        assert!(svc.resolve_variant("Secure Endowment", 30, 34.0, date(2024, 8, 1)).is_none());
        let provisional = svc.find_best_match(date(1990, 6, 15), date(2024, 8, 1), Some("Secure Endowment"));
        assert!(provisional.is_eligible());
    }

    #[test]
    fn test_ppt_options_without_variant() {
        let svc = service();
        assert!(svc.ppt_options(None, Some(15)).is_empty());
    }

    #[test]
    fn test_applicant_context_age() {
        let ctx = ApplicantContext {
            date_of_birth: date(1990, 6, 15),
            purchase_date: date(2024, 6, 14),
            plan_name: Some("Secure Endowment".to_string()),
            policy_term: None,
        };
        assert_eq!(ctx.age_at_purchase(), 33);
    }
}
