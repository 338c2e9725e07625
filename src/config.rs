//! Rate configuration document
//!
//! The settings a store keeps for one rate: display label, free threshold
//! and raw rules. Loaded from YAML, or JSON when the file ends in `.json`.
//!
//! ```yaml
//! label: "Bulk shipping"
//! free_threshold: 100
//! rules:
//!   - { min: 1, max: 10, cost: 5 }
//!   - { min: 11, max: 30, cost: 8 }
//! ```

use crate::error::{Error, Result};
use crate::parse::parse;
use crate::raw::RawRules;
use crate::sanitize::sanitize;
use crate::tier::RuleSet;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A single rate's configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "tierrate config", description = "Quantity-tiered rate configuration")]
pub struct RateConfig {
    /// Display label, passed through to quotes untouched
    #[serde(default = "default_label")]
    pub label: String,

    /// Quantity at or above which the cost is zero; 0 disables it
    #[serde(default)]
    pub free_threshold: u64,

    /// Tier rules as rows or as `min,max,cost` text
    #[serde(default)]
    pub rules: RawRules,
}

fn default_label() -> String {
    "Shipping".to_string()
}

impl Default for RateConfig {
    fn default() -> Self {
        Self {
            label: default_label(),
            free_threshold: 0,
            rules: RawRules::default(),
        }
    }
}

/// On-disk document format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Json,
}

impl ConfigFormat {
    /// `.json` means JSON, anything else YAML
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ConfigFormat::Json,
            _ => ConfigFormat::Yaml,
        }
    }
}

impl RateConfig {
    /// Parse config from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_norway::from_str(yaml).map_err(|e| Error::ConfigParse(e.to_string()))
    }

    /// Serialize config to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_norway::to_string(self).map_err(|e| Error::ConfigParse(e.to_string()))
    }

    /// Parse config from JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::ConfigParse(e.to_string()))
    }

    /// Serialize config to JSON string
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::ConfigParse(e.to_string()))
    }

    /// Parse in the given format
    pub fn from_str_as(content: &str, format: ConfigFormat) -> Result<Self> {
        match format {
            ConfigFormat::Yaml => Self::from_yaml(content),
            ConfigFormat::Json => Self::from_json(content),
        }
    }

    /// Serialize in the given format
    pub fn to_string_as(&self, format: ConfigFormat) -> Result<String> {
        match format {
            ConfigFormat::Yaml => self.to_yaml(),
            ConfigFormat::Json => self.to_json(),
        }
    }

    /// Load a config file, choosing the format by extension
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(Error::Io)?;
        Self::from_str_as(&content, ConfigFormat::from_path(path)).map_err(|e| match e {
            Error::ConfigParse(msg) => {
                Error::ConfigParse(format!("Failed to parse {}: {}", path.display(), msg))
            }
            other => other,
        })
    }

    /// Validated tiers for this config
    pub fn rule_set(&self) -> RuleSet {
        parse(&self.rules)
    }

    /// Copy with rules normalized for storage
    pub fn sanitized(&self) -> Self {
        Self {
            rules: sanitize(&self.rules),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_parse_yaml_rows() {
        let yaml = r#"
label: "Bulk shipping"
free_threshold: 100
rules:
  - { min: 1, max: 10, cost: 5 }
  - { min: "11", max: 30, cost: "8.50" }
  - { min: 0, max: 3, cost: 1 }
"#;
        let config = RateConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.label, "Bulk shipping");
        assert_eq!(config.free_threshold, 100);
        let rules = config.rule_set();
        assert_eq!(rules.len(), 2);
        assert_eq!(rules.tiers()[1].cost, 8.5);
    }

    #[test]
    fn test_parse_yaml_text_rules() {
        let yaml = "rules: |\n  1,10,5\n  11,30,8\n";
        let config = RateConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.label, "Shipping");
        assert_eq!(config.free_threshold, 0);
        assert_eq!(config.rules, RawRules::Text("1,10,5\n11,30,8\n".into()));
        assert_eq!(config.rule_set().len(), 2);
    }

    #[test]
    fn test_empty_document_defaults() {
        let config = RateConfig::from_json("{}").unwrap();
        assert_eq!(config, RateConfig::default());
        assert!(config.rule_set().is_empty());
    }

    #[test]
    fn test_non_map_rows_are_dropped_not_fatal() {
        let json = r#"{"rules": [{"min": 1, "max": 10, "cost": 5}, "junk", null]}"#;
        let config = RateConfig::from_json(json).unwrap();
        let rules = config.rule_set();
        assert_eq!(rules.len(), 1);
        assert_eq!(rules.tiers()[0], crate::tier::Tier::new(1, 10, 5.0).unwrap());

        let yaml = "rules:\n  - { min: 1, max: 10, cost: 5 }\n  - just text\n  - 3\n";
        assert_eq!(RateConfig::from_yaml(yaml).unwrap().rule_set().len(), 1);
    }

    #[test]
    fn test_null_rules_fall_back_to_empty() {
        let config = RateConfig::from_yaml("label: x\nrules:\n").unwrap();
        assert_eq!(config.label, "x");
        assert_eq!(config.rules, RawRules::default());
        assert_eq!(crate::resolve::resolve(5, &config.rule_set(), 0), 0.0);

        let config = RateConfig::from_json(r#"{"rules": null}"#).unwrap();
        assert!(config.rule_set().is_empty());
    }

    #[test]
    fn test_negative_threshold_is_rejected() {
        assert!(matches!(
            RateConfig::from_yaml("free_threshold: -1"),
            Err(Error::ConfigParse(_))
        ));
    }

    #[test]
    fn test_sanitized_keeps_label_and_threshold() {
        let config = RateConfig {
            label: "Flat".into(),
            free_threshold: 7,
            rules: "1,5,2\n5,1,3".into(),
        };
        let clean = config.sanitized();
        assert_eq!(clean.label, "Flat");
        assert_eq!(clean.free_threshold, 7);
        assert_eq!(clean.rules, RawRules::Text("1,5,2".into()));
    }

    #[test]
    fn test_load_by_extension() {
        let temp = TempDir::new().unwrap();

        let json = temp.path().join("rate.json");
        fs::write(&json, r#"{"free_threshold": 20, "rules": "1,10,4"}"#).unwrap();
        let config = RateConfig::load(&json).unwrap();
        assert_eq!(config.free_threshold, 20);

        let yaml = temp.path().join("rate.yaml");
        fs::write(&yaml, config.to_yaml().unwrap()).unwrap();
        assert_eq!(RateConfig::load(&yaml).unwrap(), config);
    }

    #[test]
    fn test_load_missing_file() {
        let temp = TempDir::new().unwrap();
        let result = RateConfig::load(&temp.path().join("absent.yaml"));
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
