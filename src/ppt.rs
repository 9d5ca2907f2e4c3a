//! Premium-paying-term rule engine
//!
//! The catalog encodes PPT rules as a single string field with five distinct
//! shapes: "1" (single premium), "0" (pays for the full policy term), a
//! comma-separated list of explicit year values, a negative offset ("-N" =
//! policy term minus N years), or a fixed positive integer. The string is
//! parsed once at catalog load into [`PremiumTermRule`] so resolution never
//! re-inspects the raw text.

use serde::{Deserialize, Serialize};

/// A parsed premium-paying-term specification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PremiumTermRule {
    /// Spec "1": one premium paid up front
    SinglePremium,
    /// Spec "0": premiums paid for the entire policy term
    SameAsTerm,
    /// Comma-separated list of selectable paying terms in years
    ExplicitList(Vec<u32>),
    /// Spec "-N": paying term is the policy term minus N years
    TermMinusOffset(u32),
    /// Fixed positive number of paying years
    Fixed(u32),
    /// Empty or unrecognized spec; the PPT selection step is skipped
    Unspecified,
}

impl PremiumTermRule {
    /// Parse a raw PPT spec string, evaluated in priority order
    pub fn parse(raw: &str) -> Self {
        let spec = raw.trim();
        if spec.is_empty() {
            return PremiumTermRule::Unspecified;
        }
        if spec == "1" {
            return PremiumTermRule::SinglePremium;
        }
        if spec == "0" {
            return PremiumTermRule::SameAsTerm;
        }
        if spec.contains(',') {
            let values: Vec<u32> = spec
                .split(',')
                .filter_map(|token| token.trim().parse().ok())
                .collect();
            return PremiumTermRule::ExplicitList(values);
        }
        if let Some(rest) = spec.strip_prefix('-') {
            return match leading_int(rest) {
                Some(n) => PremiumTermRule::TermMinusOffset(n),
                None => PremiumTermRule::Unspecified,
            };
        }
        match leading_int(spec) {
            Some(n) => PremiumTermRule::Fixed(n),
            None => PremiumTermRule::Unspecified,
        }
    }
}

fn leading_int(s: &str) -> Option<u32> {
    let digits: String = s.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}

/// One selectable premium-paying-term choice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PptOption {
    /// Paying term in years
    pub value: u32,
    /// Display label for the selection UI
    pub label: String,
}

impl PptOption {
    fn new(value: u32, label: String) -> Self {
        Self { value, label }
    }
}

/// Derive the selectable PPT options for a rule and a chosen policy term.
///
/// `policy_term` is `None` before the applicant has picked a term; rules
/// that derive from the policy term return no options until it is known.
pub fn ppt_options(rule: &PremiumTermRule, policy_term: Option<u32>) -> Vec<PptOption> {
    match rule {
        PremiumTermRule::SinglePremium => {
            vec![PptOption::new(1, "1 year (Single Premium)".to_string())]
        }
        PremiumTermRule::SameAsTerm => match policy_term {
            Some(term) if term > 0 => {
                vec![PptOption::new(term, format!("{} years (Same as Policy Term)", term))]
            }
            _ => Vec::new(),
        },
        PremiumTermRule::ExplicitList(values) => values
            .iter()
            .map(|&v| PptOption::new(v, format!("{} years", v)))
            .collect(),
        PremiumTermRule::TermMinusOffset(subtract) => match policy_term {
            Some(term) if term > *subtract => {
                let ppt = term - subtract;
                vec![PptOption::new(ppt, format!("{} years (Policy Term - {})", ppt, subtract))]
            }
            _ => Vec::new(),
        },
        PremiumTermRule::Fixed(n) => {
            vec![PptOption::new(*n, format!("{} years", n))]
        }
        PremiumTermRule::Unspecified => Vec::new(),
    }
}

/// Whether the PPT selection field should appear in the form flow.
///
/// True for every recognized rule shape; only a missing or unparseable spec
/// hides the step.
pub fn should_show_ppt_field(rule: &PremiumTermRule) -> bool {
    !matches!(rule, PremiumTermRule::Unspecified)
}
