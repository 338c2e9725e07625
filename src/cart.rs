//! Cart quantity aggregation
//!
//! Tiers match against the total item count in the cart, not the number
//! of distinct lines.

use crate::error::{Error, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One cart line
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
pub struct CartLine {
    /// Product or SKU identifier, informational only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item: Option<String>,

    #[serde(default)]
    pub quantity: u64,
}

impl CartLine {
    pub fn new(item: impl Into<String>, quantity: u64) -> Self {
        Self {
            item: Some(item.into()),
            quantity,
        }
    }
}

/// Total item count across all lines, saturating at `u64::MAX`
pub fn cart_quantity(lines: &[CartLine]) -> u64 {
    lines
        .iter()
        .fold(0u64, |total, line| total.saturating_add(line.quantity))
}

/// Parse a list of cart lines from YAML
pub fn lines_from_yaml(yaml: &str) -> Result<Vec<CartLine>> {
    serde_norway::from_str(yaml).map_err(|e| Error::ConfigParse(e.to_string()))
}

/// Parse a list of cart lines from JSON
pub fn lines_from_json(json: &str) -> Result<Vec<CartLine>> {
    serde_json::from_str(json).map_err(|e| Error::ConfigParse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cart_quantity_sums_lines() {
        let lines = vec![CartLine::new("mug", 3), CartLine::new("tee", 4)];
        assert_eq!(cart_quantity(&lines), 7);
        assert_eq!(cart_quantity(&[]), 0);
    }

    #[test]
    fn test_cart_quantity_saturates() {
        let lines = vec![CartLine::new("a", u64::MAX), CartLine::new("b", 1)];
        assert_eq!(cart_quantity(&lines), u64::MAX);
    }

    #[test]
    fn test_lines_from_yaml() {
        let yaml = r#"
- item: mug
  quantity: 2
- quantity: 5
"#;
        let lines = lines_from_yaml(yaml).unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].item, None);
        assert_eq!(cart_quantity(&lines), 7);
    }

    #[test]
    fn test_lines_from_json_rejects_garbage() {
        assert!(matches!(
            lines_from_json("{not json"),
            Err(Error::ConfigParse(_))
        ));
    }
}
