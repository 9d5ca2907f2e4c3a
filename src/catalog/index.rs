//! Indexed, read-only catalog of policy variants
//!
//! Built once from the raw dataset in a single O(n) pass; every lookup
//! thereafter is O(1) amortized. Lookups never fail, an unknown key simply
//! yields an empty result.

use super::data::PolicyVariant;
use super::loader::CatalogError;
use std::collections::HashMap;

/// The immutable variant list plus lookup tables by identifier, plan name,
/// and classification tag. Constructed once at process start and shared by
/// reference into every resolver call; all queries are read-only.
#[derive(Debug, Clone)]
pub struct PolicyCatalog {
    variants: Vec<PolicyVariant>,
    by_identifier: HashMap<String, Vec<usize>>,
    by_plan_name: HashMap<String, Vec<usize>>,
    by_classification: HashMap<String, Vec<usize>>,
}

impl PolicyCatalog {
    /// Build the catalog, validating dataset invariants:
    /// every sale window has `valid_from <= valid_to`, and a plan name maps
    /// to exactly one classification across all its variants.
    pub fn new(variants: Vec<PolicyVariant>) -> Result<Self, CatalogError> {
        let mut by_identifier: HashMap<String, Vec<usize>> = HashMap::new();
        let mut by_plan_name: HashMap<String, Vec<usize>> = HashMap::new();
        let mut by_classification: HashMap<String, Vec<usize>> = HashMap::new();
        let mut plan_classification: HashMap<&str, &str> = HashMap::new();

        for (idx, variant) in variants.iter().enumerate() {
            if let Some(to) = variant.valid_to {
                if variant.valid_from > to {
                    return Err(CatalogError::InvalidSaleWindow {
                        identifier: variant.identifier.clone(),
                    });
                }
            }

            match plan_classification.get(variant.plan_name.as_str()) {
                Some(tag) if *tag != variant.classification => {
                    return Err(CatalogError::AmbiguousClassification {
                        plan_name: variant.plan_name.clone(),
                    });
                }
                Some(_) => {}
                None => {
                    plan_classification.insert(&variant.plan_name, &variant.classification);
                }
            }

            by_identifier.entry(variant.identifier.clone()).or_default().push(idx);
            by_plan_name.entry(variant.plan_name.clone()).or_default().push(idx);
            by_classification.entry(variant.classification.clone()).or_default().push(idx);
        }

        Ok(Self { variants, by_identifier, by_plan_name, by_classification })
    }

    /// All variants in catalog insertion order
    pub fn all_variants(&self) -> &[PolicyVariant] {
        &self.variants
    }

    /// Variants sharing a regulatory filing code (normally 0 or 1)
    pub fn by_identifier(&self, identifier: &str) -> Vec<&PolicyVariant> {
        self.select(self.by_identifier.get(identifier))
    }

    /// All historical filings of a retail plan name
    pub fn by_plan_name(&self, plan_name: &str) -> Vec<&PolicyVariant> {
        self.select(self.by_plan_name.get(plan_name))
    }

    /// Variants carrying a classification tag
    pub fn by_classification(&self, classification: &str) -> Vec<&PolicyVariant> {
        self.select(self.by_classification.get(classification))
    }

    /// Sorted unique plan names, for dropdown population
    pub fn unique_plan_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.by_plan_name.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    fn select(&self, indexes: Option<&Vec<usize>>) -> Vec<&PolicyVariant> {
        indexes
            .map(|idxs| idxs.iter().map(|&i| &self.variants[i]).collect())
            .unwrap_or_default()
    }
}
