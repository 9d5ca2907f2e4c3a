//! Load the policy catalog from its master-data JSON file

use super::data::{BoundValue, PolicyVariant, SumAssuredLimit};
use super::index::PolicyCatalog;
use crate::ppt::PremiumTermRule;
use chrono::NaiveDate;
use log::info;
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use thiserror::Error;

/// Default catalog location relative to the working directory
pub const DEFAULT_CATALOG_PATH: &str = "data/policy_catalog.json";

/// Errors surfaced while loading or validating the catalog.
///
/// These are the only fatal errors in the crate; every query-time "failure"
/// is expressed as absence instead.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("variant {identifier} has FromDate after ToDate")]
    InvalidSaleWindow { identifier: String },

    #[error("plan {plan_name} maps to more than one classification")]
    AmbiguousClassification { plan_name: String },
}

/// Raw JSON record matching the master-data field names
#[derive(Debug, Deserialize)]
struct RawVariant {
    #[serde(rename = "UIN")]
    uin: String,
    #[serde(rename = "PlanName")]
    plan_name: String,
    #[serde(rename = "Module")]
    module: String,
    #[serde(rename = "FromDate")]
    from_date: NaiveDate,
    #[serde(rename = "ToDate", default)]
    to_date: Option<NaiveDate>,
    #[serde(rename = "MinEntryAge")]
    min_entry_age: BoundValue,
    #[serde(rename = "MaxEntryAge")]
    max_entry_age: BoundValue,
    #[serde(rename = "MinPolicyTerm")]
    min_policy_term: BoundValue,
    #[serde(rename = "MaxPolicyTerm")]
    max_policy_term: BoundValue,
    #[serde(rename = "MinAgeAtMaturity", default)]
    min_age_at_maturity: Option<i32>,
    #[serde(rename = "MaxAgeAtMaturity", default)]
    max_age_at_maturity: Option<i32>,
    #[serde(rename = "PPT", default)]
    ppt: String,
    #[serde(rename = "MinSumAssured", default)]
    min_sum_assured: Option<u64>,
    #[serde(rename = "MaxSumAssured", default)]
    max_sum_assured: Option<RawSumAssured>,
    #[serde(rename = "SumAssuredMultiples", default)]
    sum_assured_multiples: Option<u64>,
}

/// MaxSumAssured arrives as either a number or the literal "No Limit"
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawSumAssured {
    Amount(u64),
    Text(String),
}

impl RawSumAssured {
    fn to_limit(&self) -> SumAssuredLimit {
        match self {
            RawSumAssured::Amount(n) => SumAssuredLimit::Amount(*n),
            RawSumAssured::Text(s) => {
                let digits: String = s
                    .chars()
                    .skip_while(|c| !c.is_ascii_digit())
                    .take_while(|c| c.is_ascii_digit())
                    .collect();
                match digits.parse() {
                    Ok(n) => SumAssuredLimit::Amount(n),
                    Err(_) => SumAssuredLimit::NoLimit,
                }
            }
        }
    }
}

impl RawVariant {
    fn to_variant(self) -> PolicyVariant {
        // The PPT spec is parsed once here; resolution never re-reads the
        // raw string
        let premium_paying_term = PremiumTermRule::parse(&self.ppt);

        PolicyVariant {
            identifier: self.uin,
            plan_name: self.plan_name,
            classification: self.module,
            valid_from: self.from_date,
            valid_to: self.to_date,
            min_entry_age: self.min_entry_age,
            max_entry_age: self.max_entry_age,
            min_policy_term: self.min_policy_term,
            max_policy_term: self.max_policy_term,
            min_age_at_maturity: self.min_age_at_maturity,
            max_age_at_maturity: self.max_age_at_maturity,
            premium_paying_term,
            premium_paying_term_raw: self.ppt,
            min_sum_assured: self.min_sum_assured,
            max_sum_assured: self.max_sum_assured.as_ref().map(RawSumAssured::to_limit),
            sum_assured_multiples: self.sum_assured_multiples,
        }
    }
}

/// Load and index the catalog from a JSON file
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<PolicyCatalog, CatalogError> {
    let file = File::open(path.as_ref())?;
    let catalog = load_catalog_from_reader(BufReader::new(file))?;
    info!(
        "loaded {} policy variants across {} plans from {}",
        catalog.len(),
        catalog.unique_plan_names().len(),
        path.as_ref().display()
    );
    Ok(catalog)
}

/// Load the catalog from any reader (e.g., string buffer, embedded bytes)
pub fn load_catalog_from_reader<R: std::io::Read>(reader: R) -> Result<PolicyCatalog, CatalogError> {
    let rows: Vec<RawVariant> = serde_json::from_reader(reader)?;
    let variants = rows.into_iter().map(RawVariant::to_variant).collect();
    PolicyCatalog::new(variants)
}

/// Load the catalog from the default master-data location
pub fn load_default_catalog() -> Result<PolicyCatalog, CatalogError> {
    load_catalog(DEFAULT_CATALOG_PATH)
}
