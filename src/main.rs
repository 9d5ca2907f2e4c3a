//! Policy Engine CLI
//!
//! Walks the review flow for one applicant: eligible plans for the given
//! dates, then term options, variant resolution, PPT options, and
//! sum-assured validation as further answers are supplied.

use anyhow::Context;
use chrono::NaiveDate;
use clap::Parser;
use policy_engine::catalog::loader::DEFAULT_CATALOG_PATH;
use policy_engine::{age_at_purchase, ReviewService};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "policy_engine", about = "Policy eligibility and variant resolution")]
struct Args {
    /// Path to the catalog master-data JSON
    #[arg(long, default_value = DEFAULT_CATALOG_PATH)]
    catalog: PathBuf,

    /// Applicant's date of birth (YYYY-MM-DD)
    #[arg(long)]
    date_of_birth: NaiveDate,

    /// Policy purchase date (YYYY-MM-DD)
    #[arg(long)]
    purchase_date: NaiveDate,

    /// Chosen plan name
    #[arg(long)]
    plan: Option<String>,

    /// Chosen policy term in years
    #[arg(long)]
    term: Option<u32>,

    /// Candidate sum assured to validate
    #[arg(long)]
    sum_assured: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let service = ReviewService::from_path(&args.catalog)
        .with_context(|| format!("loading catalog from {}", args.catalog.display()))?;

    let age = age_at_purchase(args.date_of_birth, args.purchase_date);
    println!("Age at purchase: {} years", age);

    let names = service.eligible_plan_names(args.date_of_birth, args.purchase_date);
    if names.is_empty() {
        println!("No eligible plans for your purchase date and age");
        return Ok(());
    }
    println!("Eligible plans ({}):", names.len());
    for name in &names {
        println!("  {}", name);
    }

    let Some(plan) = args.plan else {
        return Ok(());
    };

    match service.classify_plan(&plan, args.date_of_birth, args.purchase_date) {
        Some(tag) => println!("\n{}: {}", plan, tag),
        None => {
            println!("\n{} is not available for your purchase date or age", plan);
            return Ok(());
        }
    }

    let terms = service.term_options(&plan, age as f64, args.purchase_date);
    println!("Valid policy terms: {:?}", terms);

    let Some(term) = args.term else {
        return Ok(());
    };

    // A term-specific miss falls back to the provisional latest-filing match
    let variant = service
        .resolve_variant(&plan, term, age as f64, args.purchase_date)
        .or_else(|| {
            service
                .find_best_match(args.date_of_birth, args.purchase_date, Some(&plan))
                .variant
        });

    let Some(variant) = variant else {
        println!("No variant of {} governs a {}-year term", plan, term);
        return Ok(());
    };

    println!("\nGoverning variant: {} (filed {})", variant.identifier, variant.valid_from);
    if service.should_show_ppt_field(variant) {
        println!("Premium paying term options:");
        for opt in service.ppt_options(Some(variant), Some(term)) {
            println!("  {}", opt.label);
        }
    }

    if let Some(amount) = args.sum_assured {
        match service.validate_sum_assured(variant, amount) {
            policy_engine::SumAssuredCheck::Ok => println!("Sum assured {} accepted", amount),
            policy_engine::SumAssuredCheck::Violation(msg) => println!("{}", msg),
        }
    }

    Ok(())
}
