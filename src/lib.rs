//! Policy Engine - Eligibility and variant resolution over historical insurance plan catalogs
//!
//! This library provides:
//! - An indexed, read-only catalog of dated regulatory plan filings
//! - Eligibility filtering by sale window and entry-age bounds
//! - Policy-term option derivation (term-ranged and age-linked families)
//! - Term-aware variant selection across filings sharing a plan name
//! - Premium-paying-term rule parsing and option derivation
//! - Sum-assured limit validation

pub mod catalog;
pub mod eligibility;
pub mod normalize;
pub mod ppt;
pub mod service;
pub mod sum_assured;
pub mod terms;
pub mod variant;

// Re-export commonly used types
pub use catalog::{BoundValue, CatalogError, PolicyCatalog, PolicyVariant, SumAssuredLimit};
pub use eligibility::{age_at_purchase, EligibilityQuery};
pub use ppt::{PptOption, PremiumTermRule};
pub use service::{ApplicantContext, ReviewService};
pub use sum_assured::SumAssuredCheck;
pub use variant::{BestMatch, AGE_LINKED_IDENTIFIERS};
