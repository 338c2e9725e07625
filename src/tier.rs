//! Validated tiers and the ordered rule set they form

use schemars::JsonSchema;
use serde::Serialize;
use std::fmt;

/// An inclusive quantity range mapped to a fixed cost
///
/// Construct through [`Tier::new`], which enforces `1 <= min <= max` and
/// `cost >= 0`.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, JsonSchema)]
pub struct Tier {
    pub min: u64,
    pub max: u64,
    pub cost: f64,
}

impl Tier {
    /// Validate coerced values into a tier
    ///
    /// Returns `None` when `min <= 0`, `max <= 0` or `max < min`. A negative
    /// or non-finite cost does not reject the row; it clamps to zero.
    pub fn new(min: i64, max: i64, cost: f64) -> Option<Self> {
        if min <= 0 || max <= 0 || max < min {
            return None;
        }
        let cost = if cost.is_finite() && cost > 0.0 { cost } else { 0.0 };
        Some(Self {
            min: min as u64,
            max: max as u64,
            cost,
        })
    }

    /// Inclusive range check
    pub fn contains(&self, quantity: u64) -> bool {
        self.min <= quantity && quantity <= self.max
    }

    /// Number of quantities this tier spans
    pub fn width(&self) -> u64 {
        self.max - self.min + 1
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.min, self.max, self.cost)
    }
}

/// Ordered tiers; position is evaluation priority
///
/// Built fresh from configuration for every evaluation and never sorted.
#[derive(Debug, Clone, Default, Serialize, PartialEq, JsonSchema)]
#[serde(transparent)]
pub struct RuleSet {
    tiers: Vec<Tier>,
}

impl RuleSet {
    pub fn new(tiers: Vec<Tier>) -> Self {
        Self { tiers }
    }

    pub fn tiers(&self) -> &[Tier] {
        &self.tiers
    }

    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Tier> {
        self.tiers.iter()
    }

    /// First tier containing `quantity`, with its position
    pub fn first_match(&self, quantity: u64) -> Option<(usize, &Tier)> {
        self.tiers.iter().enumerate().find(|(_, t)| t.contains(quantity))
    }

    /// Highest `max` across all tiers
    pub fn upper_bound(&self) -> Option<u64> {
        self.tiers.iter().map(|t| t.max).max()
    }

    /// Canonical `min,max,cost` text, one tier per line, no trailing newline
    pub fn to_text(&self) -> String {
        self.tiers
            .iter()
            .map(|t| t.to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn into_inner(self) -> Vec<Tier> {
        self.tiers
    }
}

impl From<Vec<Tier>> for RuleSet {
    fn from(tiers: Vec<Tier>) -> Self {
        Self::new(tiers)
    }
}

impl FromIterator<Tier> for RuleSet {
    fn from_iter<I: IntoIterator<Item = Tier>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a Tier;
    type IntoIter = std::slice::Iter<'a, Tier>;

    fn into_iter(self) -> Self::IntoIter {
        self.tiers.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tier(min: i64, max: i64, cost: f64) -> Tier {
        Tier::new(min, max, cost).unwrap()
    }

    #[test]
    fn test_new_rejects_invalid_ranges() {
        assert!(Tier::new(0, 5, 1.0).is_none());
        assert!(Tier::new(1, 0, 1.0).is_none());
        assert!(Tier::new(-3, 5, 1.0).is_none());
        assert!(Tier::new(6, 5, 1.0).is_none());
    }

    #[test]
    fn test_new_accepts_single_quantity() {
        let t = tier(4, 4, 2.5);
        assert!(t.contains(4));
        assert!(!t.contains(3));
        assert!(!t.contains(5));
        assert_eq!(t.width(), 1);
    }

    #[test]
    fn test_new_clamps_negative_cost() {
        assert_eq!(tier(1, 5, -3.0).cost, 0.0);
        assert_eq!(tier(1, 5, f64::NAN).cost, 0.0);
    }

    #[test]
    fn test_first_match_prefers_earliest() {
        let rules = RuleSet::new(vec![tier(1, 5, 2.0), tier(1, 10, 9.0)]);
        let (index, t) = rules.first_match(5).unwrap();
        assert_eq!(index, 0);
        assert_eq!(t.cost, 2.0);
        assert_eq!(rules.first_match(6).unwrap().0, 1);
        assert!(rules.first_match(0).is_none());
    }

    #[test]
    fn test_to_text_format() {
        let rules = RuleSet::new(vec![tier(1, 10, 5.0), tier(11, 30, 7.5)]);
        assert_eq!(rules.to_text(), "1,10,5\n11,30,7.5");
        assert_eq!(RuleSet::default().to_text(), "");
    }

    #[test]
    fn test_upper_bound() {
        let rules = RuleSet::new(vec![tier(20, 40, 1.0), tier(1, 10, 5.0)]);
        assert_eq!(rules.upper_bound(), Some(40));
        assert_eq!(RuleSet::default().upper_bound(), None);
    }
}
