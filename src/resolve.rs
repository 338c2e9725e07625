//! Cost resolution
//!
//! ```text
//! quantity ──► threshold > 0 && quantity >= threshold ──► 0 (free)
//!                   │ no
//!                   ▼
//!              first tier with min <= quantity <= max ──► tier.cost
//!                   │ none
//!                   ▼
//!              0 (fallback)
//! ```
//!
//! An unmatched quantity costs nothing and is not an error.

use crate::config::RateConfig;
use crate::parse::parse;
use crate::tier::{RuleSet, Tier};
use schemars::JsonSchema;
use serde::Serialize;
use tracing::trace;

/// How a cost was arrived at
#[derive(Debug, Clone, Copy, Serialize, PartialEq, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Resolution {
    /// Quantity reached the free threshold; tiers were not consulted
    FreeThreshold { threshold: u64 },
    /// First matching tier, by position in the rule set
    Tier { index: usize, tier: Tier },
    /// No tier matched
    Fallback,
}

impl Resolution {
    pub fn cost(&self) -> f64 {
        match self {
            Resolution::Tier { tier, .. } => tier.cost,
            Resolution::FreeThreshold { .. } | Resolution::Fallback => 0.0,
        }
    }
}

/// Evaluation result handed back to the caller
#[derive(Debug, Clone, Serialize, PartialEq, JsonSchema)]
pub struct Quote {
    /// Display label, passed through untouched
    pub label: String,
    pub quantity: u64,
    pub cost: f64,
    pub basis: Resolution,
}

/// Resolve a cost and report which branch produced it
pub fn explain(quantity: u64, rules: &RuleSet, free_threshold: u64) -> Resolution {
    if free_threshold > 0 && quantity >= free_threshold {
        trace!(quantity, free_threshold, "free threshold reached");
        return Resolution::FreeThreshold {
            threshold: free_threshold,
        };
    }

    match rules.first_match(quantity) {
        Some((index, tier)) => {
            trace!(quantity, index, cost = tier.cost, "tier matched");
            Resolution::Tier { index, tier: *tier }
        }
        None => {
            trace!(quantity, tiers = rules.len(), "no tier matched");
            Resolution::Fallback
        }
    }
}

/// Resolve the cost for `quantity`
pub fn resolve(quantity: u64, rules: &RuleSet, free_threshold: u64) -> f64 {
    explain(quantity, rules, free_threshold).cost()
}

/// Parse the configured rules and quote `quantity` against them
///
/// The rule set is rebuilt from `config` on every call.
pub fn evaluate(quantity: u64, config: &RateConfig) -> Quote {
    let rules = parse(&config.rules);
    let basis = explain(quantity, &rules, config.free_threshold);
    Quote {
        label: config.label.clone(),
        quantity,
        cost: basis.cost(),
        basis,
    }
}
