// Production-quality lints
#![warn(
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro,
    clippy::print_stdout,
    clippy::print_stderr
)]
// Deny truly dangerous patterns
#![deny(clippy::mem_forget)]
// Allow common patterns in library code
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

//! # tierrate — quantity-tiered rate resolution
//!
//! Given an item quantity, pick a cost from an ordered list of inclusive
//! `[min, max]` tiers, with an optional threshold at or above which the
//! cost is zero.
//!
//! ## Quick Start
//!
//! ```rust
//! use tierrate::{parse, resolve, RawRules};
//!
//! let rules = parse(&RawRules::from("1,10,5\n11,30,8\n31,50,12"));
//! assert_eq!(rules.len(), 3);
//!
//! assert_eq!(resolve(5, &rules, 0), 5.0);
//! assert_eq!(resolve(20, &rules, 0), 8.0);
//! assert_eq!(resolve(80, &rules, 0), 0.0);   // no tier: falls back to 0
//! assert_eq!(resolve(20, &rules, 15), 0.0);  // free threshold reached
//! ```
//!
//! ## Rules
//!
//! - Tiers are evaluated in the order given; the **first** tier containing
//!   the quantity wins, overlapping or not.
//! - A tier needs `min >= 1` and `max >= min`. Anything else is dropped
//!   while parsing, never reported as an error.
//! - A free threshold of `0` is disabled. Otherwise any quantity
//!   `>= threshold` costs `0` without consulting the tiers.
//! - A quantity no tier matches costs `0`.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                                                             │
//! │  RateConfig (YAML / JSON)                                   │
//! │       │                                                     │
//! │       ├──► parse(rules) ──► RuleSet                         │
//! │       │                       │                             │
//! │       │                       ├──► resolve(qty, ..) ──► f64 │
//! │       │                       │                             │
//! │       │                       └──► analyze_coverage(..)     │
//! │       │                                                     │
//! │       ├──► evaluate(qty, config) ──► Quote                  │
//! │       │                                                     │
//! │       └──► sanitize(rules) ──► RawRules (storage form)      │
//! │                                                             │
//! └─────────────────────────────────────────────────────────────┘
//! ```

// Data model
pub mod cart;
pub mod config;
pub mod error;
pub mod raw;
pub mod tier;

// Operations
pub mod coverage;
pub mod parse;
pub mod resolve;
pub mod sanitize;

// Re-exports
pub use cart::{cart_quantity, CartLine};
pub use config::{ConfigFormat, RateConfig};
pub use coverage::{analyze_coverage, CoverageReport, QuantityRange, TierOverlap};
pub use error::{Error, Result};
pub use parse::{parse, parse_rows, parse_text};
pub use raw::{coerce_decimal, coerce_int, RawField, RawRow, RawRules};
pub use resolve::{evaluate, explain, resolve, Quote, Resolution};
pub use sanitize::{sanitize, sanitize_rows, sanitize_text};
pub use tier::{RuleSet, Tier};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
