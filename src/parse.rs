//! Rule parsing: raw configuration into a validated [`RuleSet`]
//!
//! Parsing is total. Rows that do not survive coercion and validation are
//! dropped silently (a `debug` event is recorded) and the relative order of
//! the surviving rows is kept.

use crate::raw::{coerce_decimal, coerce_int, field_decimal, field_int, RawRow, RawRules};
use crate::tier::{RuleSet, Tier};
use tracing::debug;

/// Parse either raw shape into an ordered, validated rule set
pub fn parse(raw: &RawRules) -> RuleSet {
    match raw {
        RawRules::Rows(rows) => parse_rows(rows),
        RawRules::Text(text) => parse_text(text),
    }
}

/// Parse structured rows
pub fn parse_rows(rows: &[RawRow]) -> RuleSet {
    rows.iter()
        .enumerate()
        .filter_map(|(index, row)| {
            let tier = normalize_row(row);
            if tier.is_none() {
                debug!(index, ?row, "dropping invalid rule row");
            }
            tier
        })
        .collect()
}

/// Parse the legacy `min,max,cost` text form
///
/// Blank lines and lines with fewer than three comma-separated parts are
/// skipped. Parts past the third are ignored.
pub fn parse_text(text: &str) -> RuleSet {
    text.lines()
        .enumerate()
        .filter_map(|(line_no, line)| {
            let line = line.trim();
            if line.is_empty() {
                return None;
            }
            let tier = normalize_line(line);
            if tier.is_none() {
                debug!(line = line_no + 1, content = line, "dropping invalid rule line");
            }
            tier
        })
        .collect()
}

/// Coerce and validate a single structured row
pub fn normalize_row(row: &RawRow) -> Option<Tier> {
    Tier::new(
        field_int(row.min.as_ref()),
        field_int(row.max.as_ref()),
        field_decimal(row.cost.as_ref()),
    )
}

/// Coerce and validate a single text line
pub fn normalize_line(line: &str) -> Option<Tier> {
    let parts: Vec<&str> = line.split(',').map(str::trim).collect();
    if parts.len() < 3 {
        return None;
    }
    Tier::new(
        coerce_int(parts[0]),
        coerce_int(parts[1]),
        coerce_decimal(parts[2]),
    )
}
