//! Coverage diagnostics for a validated rule set
//!
//! Reports overlapping tiers, tiers that can never win, and quantity ranges
//! no tier prices. Informational only: none of this changes what
//! [`crate::resolve`] returns.

use crate::tier::RuleSet;
use schemars::JsonSchema;
use serde::Serialize;

/// An inclusive quantity range
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, JsonSchema)]
pub struct QuantityRange {
    pub min: u64,
    pub max: u64,
}

impl QuantityRange {
    pub fn new(min: u64, max: u64) -> Self {
        Self { min, max }
    }
}

impl std::fmt::Display for QuantityRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.min == self.max {
            write!(f, "{}", self.min)
        } else {
            write!(f, "{}-{}", self.min, self.max)
        }
    }
}

/// Two tiers sharing quantities; `earlier` wins on `range`
#[derive(Debug, Clone, Serialize, PartialEq, Eq, JsonSchema)]
pub struct TierOverlap {
    pub earlier: usize,
    pub later: usize,
    pub range: QuantityRange,
}

/// Coverage analysis result
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq, JsonSchema)]
pub struct CoverageReport {
    pub tier_count: usize,

    /// Pairs of tiers with intersecting ranges
    pub overlaps: Vec<TierOverlap>,

    /// Tiers entirely covered by earlier tiers
    pub shadowed: Vec<usize>,

    /// Tiers starting at or above the free threshold
    pub beyond_threshold: Vec<usize>,

    /// Unpriced ranges below the threshold (or below the highest `max`
    /// when no threshold is set)
    pub gaps: Vec<QuantityRange>,

    /// No threshold is set, so every quantity above the highest `max`
    /// falls back to zero cost
    pub open_ended: bool,
}

impl CoverageReport {
    /// Nothing unreachable and nothing unpriced below the threshold
    pub fn is_clean(&self) -> bool {
        self.shadowed.is_empty()
            && self.beyond_threshold.is_empty()
            && self.gaps.is_empty()
            && !self.open_ended
    }

    /// Human-readable report
    pub fn to_report(&self) -> String {
        let mut out = format!("{} tier(s)\n", self.tier_count);
        for overlap in &self.overlaps {
            out.push_str(&format!(
                "  overlap: tier {} shadows tier {} on {}\n",
                overlap.earlier + 1,
                overlap.later + 1,
                overlap.range
            ));
        }
        for index in &self.shadowed {
            out.push_str(&format!("  unreachable: tier {} never matches\n", index + 1));
        }
        for index in &self.beyond_threshold {
            out.push_str(&format!(
                "  unreachable: tier {} starts at or above the free threshold\n",
                index + 1
            ));
        }
        for gap in &self.gaps {
            out.push_str(&format!("  gap: {} falls back to 0\n", gap));
        }
        if self.open_ended {
            out.push_str("  open-ended: quantities above the last tier fall back to 0\n");
        }
        if self.is_clean() {
            out.push_str("✓ every quantity below the threshold is priced\n");
        }
        out
    }
}

/// Analyze how `rules` cover quantities given `free_threshold`
pub fn analyze_coverage(rules: &RuleSet, free_threshold: u64) -> CoverageReport {
    let tiers = rules.tiers();
    let mut report = CoverageReport {
        tier_count: tiers.len(),
        open_ended: free_threshold == 0,
        ..Default::default()
    };

    for (later, b) in tiers.iter().enumerate() {
        for (earlier, a) in tiers.iter().enumerate().take(later) {
            let min = a.min.max(b.min);
            let max = a.max.min(b.max);
            if min <= max {
                report.overlaps.push(TierOverlap {
                    earlier,
                    later,
                    range: QuantityRange::new(min, max),
                });
            }
        }
    }

    let mut covered: Vec<QuantityRange> = Vec::new();
    for (index, tier) in tiers.iter().enumerate() {
        if free_threshold > 0 && tier.min >= free_threshold {
            report.beyond_threshold.push(index);
            continue;
        }
        // Quantities at or above the threshold are free whatever the tier says
        let max = if free_threshold > 0 {
            tier.max.min(free_threshold - 1)
        } else {
            tier.max
        };
        let span = QuantityRange::new(tier.min, max);
        if uncovered(&covered, span).is_empty() {
            report.shadowed.push(index);
        }
        insert(&mut covered, span);
    }

    let limit = if free_threshold > 0 {
        Some(free_threshold - 1)
    } else {
        rules.upper_bound()
    };
    if let Some(limit) = limit.filter(|&l| l >= 1) {
        report.gaps = uncovered(&covered, QuantityRange::new(1, limit));
    }

    report
}

/// Parts of `span` not in `covered` (sorted, disjoint)
fn uncovered(covered: &[QuantityRange], span: QuantityRange) -> Vec<QuantityRange> {
    let mut gaps = Vec::new();
    let mut cursor = span.min;
    for r in covered {
        if r.max < cursor {
            continue;
        }
        if r.min > span.max {
            break;
        }
        if r.min > cursor {
            gaps.push(QuantityRange::new(cursor, r.min - 1));
        }
        if r.max >= span.max {
            return gaps;
        }
        cursor = r.max + 1;
    }
    gaps.push(QuantityRange::new(cursor, span.max));
    gaps
}

/// Insert `span`, keeping `covered` sorted and merged
fn insert(covered: &mut Vec<QuantityRange>, span: QuantityRange) {
    covered.push(span);
    covered.sort_by_key(|r| r.min);
    let mut merged: Vec<QuantityRange> = Vec::with_capacity(covered.len());
    for r in covered.drain(..) {
        match merged.last_mut() {
            Some(last) if r.min <= last.max.saturating_add(1) => {
                last.max = last.max.max(r.max);
            }
            _ => merged.push(r),
        }
    }
    *covered = merged;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse_text;

    #[test]
    fn test_contiguous_tiers_with_threshold_are_clean() {
        let rules = parse_text("1,10,5\n11,30,8\n31,49,12");
        let report = analyze_coverage(&rules, 50);
        assert!(report.is_clean(), "{}", report.to_report());
        assert!(report.overlaps.is_empty());
    }

    #[test]
    fn test_overlap_and_shadow() {
        let rules = parse_text("1,10,9\n1,5,2\n6,12,4");
        let report = analyze_coverage(&rules, 0);
        assert_eq!(
            report.overlaps,
            vec![
                TierOverlap {
                    earlier: 0,
                    later: 1,
                    range: QuantityRange::new(1, 5)
                },
                TierOverlap {
                    earlier: 0,
                    later: 2,
                    range: QuantityRange::new(6, 10)
                },
            ]
        );
        assert_eq!(report.shadowed, vec![1]);
        assert!(report.gaps.is_empty());
        assert!(report.open_ended);
    }

    #[test]
    fn test_shadowed_by_union_of_earlier_tiers() {
        let rules = parse_text("1,5,1\n6,10,2\n3,8,3");
        let report = analyze_coverage(&rules, 0);
        assert_eq!(report.shadowed, vec![2]);
    }

    #[test]
    fn test_gaps_up_to_threshold() {
        let rules = parse_text("3,5,1\n9,10,2");
        let report = analyze_coverage(&rules, 15);
        assert_eq!(
            report.gaps,
            vec![
                QuantityRange::new(1, 2),
                QuantityRange::new(6, 8),
                QuantityRange::new(11, 14),
            ]
        );
        assert!(!report.open_ended);
    }

    #[test]
    fn test_beyond_threshold() {
        let rules = parse_text("1,9,1\n10,20,2");
        let report = analyze_coverage(&rules, 10);
        assert_eq!(report.beyond_threshold, vec![1]);
        assert!(report.gaps.is_empty());
    }

    #[test]
    fn test_shadowed_when_only_free_quantities_remain() {
        let rules = parse_text("1,9,1\n5,20,2");
        let report = analyze_coverage(&rules, 10);
        assert_eq!(report.shadowed, vec![1]);
        assert!(report.beyond_threshold.is_empty());
        assert!(report.gaps.is_empty());

        let report = analyze_coverage(&rules, 0);
        assert!(report.shadowed.is_empty());
    }

    #[test]
    fn test_empty_rules() {
        let report = analyze_coverage(&RuleSet::default(), 0);
        assert_eq!(report.tier_count, 0);
        assert!(report.gaps.is_empty());
        assert!(report.open_ended);

        let report = analyze_coverage(&RuleSet::default(), 4);
        assert_eq!(report.gaps, vec![QuantityRange::new(1, 3)]);
    }

    #[test]
    fn test_threshold_of_one_has_no_gaps() {
        let report = analyze_coverage(&RuleSet::default(), 1);
        assert!(report.gaps.is_empty());
    }
}
