//! Normalization at the persistence boundary
//!
//! Applies the same per-row validation as [`crate::parse`] but keeps the
//! storage shape: structured rows come back as validated rows, a text blob
//! comes back as canonical `min,max,cost` lines. Sanitizing twice is the
//! same as sanitizing once.

use crate::parse::{parse_rows, parse_text};
use crate::raw::{RawRow, RawRules};
use crate::tier::Tier;
use tracing::debug;

/// Normalize raw rules for storage, preserving their form
pub fn sanitize(raw: &RawRules) -> RawRules {
    match raw {
        RawRules::Rows(rows) => RawRules::Rows(sanitize_rows(rows)),
        RawRules::Text(text) => RawRules::Text(sanitize_text(text)),
    }
}

/// Validated rows with numeric fields
pub fn sanitize_rows(rows: &[RawRow]) -> Vec<RawRow> {
    let kept: Vec<RawRow> = parse_rows(rows).iter().map(tier_row).collect();
    debug!(input = rows.len(), kept = kept.len(), "sanitized rule rows");
    kept
}

/// Canonical text, invalid lines removed
pub fn sanitize_text(text: &str) -> String {
    let rules = parse_text(text);
    debug!(kept = rules.len(), "sanitized rule text");
    rules.to_text()
}

fn tier_row(tier: &Tier) -> RawRow {
    RawRow::new(tier.min as i64, tier.max as i64, tier.cost)
}
