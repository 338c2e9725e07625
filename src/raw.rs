//! Raw rule input as it arrives from the configuration store
//!
//! Rules come in one of two shapes:
//!
//! ```yaml
//! # structured rows, any field may be missing or non-numeric
//! rules:
//!   - { min: 1, max: 10, cost: 5 }
//!   - { min: "11", max: 30, cost: "8.00" }
//! ```
//!
//! ```yaml
//! # legacy text blob, one `min,max,cost` per line
//! rules: |
//!   1,10,5
//!   11,30,8
//! ```
//!
//! Nothing here validates. Fields are coerced leniently: a leading numeric
//! prefix is taken, anything else becomes zero.

use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::sync::LazyLock;
use tracing::debug;

static INT_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*([+-]?)(\d+)").expect("integer prefix pattern"));

static DECIMAL_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*[+-]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][+-]?\d+)?").expect("decimal prefix pattern")
});

/// Unvalidated rule set, tagged by input shape
///
/// Deserializing never fails on content: `null` or an unexpected shape
/// becomes an empty row list, and a list element that is not a map becomes
/// an empty row that parsing later drops.
#[derive(Debug, Clone, Serialize, PartialEq, JsonSchema)]
#[serde(untagged)]
pub enum RawRules {
    /// Structured `{min, max, cost}` records
    Rows(Vec<RawRow>),
    /// Newline-delimited `min,max,cost` text
    Text(String),
}

impl RawRules {
    /// Interpret an arbitrary document value as rules
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::String(text) => RawRules::Text(text),
            Value::Array(items) => {
                RawRules::Rows(items.into_iter().map(RawRow::from_value).collect())
            }
            Value::Null => RawRules::default(),
            other => {
                debug!(?other, "ignoring rules of unexpected shape");
                RawRules::default()
            }
        }
    }
}

impl<'de> Deserialize<'de> for RawRules {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(RawRules::from_value)
    }
}

impl Default for RawRules {
    fn default() -> Self {
        RawRules::Rows(Vec::new())
    }
}

impl From<Vec<RawRow>> for RawRules {
    fn from(rows: Vec<RawRow>) -> Self {
        RawRules::Rows(rows)
    }
}

impl From<&str> for RawRules {
    fn from(text: &str) -> Self {
        RawRules::Text(text.to_string())
    }
}

impl From<String> for RawRules {
    fn from(text: String) -> Self {
        RawRules::Text(text)
    }
}

/// One structured record; every field is optional
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct RawRow {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<RawField>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<RawField>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<RawField>,
}

impl RawRow {
    /// Build a row from already-numeric values
    pub fn new(min: i64, max: i64, cost: f64) -> Self {
        Self {
            min: Some(RawField::Int(min)),
            max: Some(RawField::Int(max)),
            cost: Some(RawField::Float(cost)),
        }
    }

    /// Interpret one list element as a row; anything but a map is empty
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(_) => serde_json::from_value(value).unwrap_or_default(),
            other => {
                debug!(?other, "rule row is not a map");
                RawRow::default()
            }
        }
    }

    /// Build a row from text fields, as a form post would deliver them
    pub fn from_text(min: &str, max: &str, cost: &str) -> Self {
        Self {
            min: Some(RawField::Text(min.to_string())),
            max: Some(RawField::Text(max.to_string())),
            cost: Some(RawField::Text(cost.to_string())),
        }
    }
}

/// A scalar of unknown type
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(untagged)]
pub enum RawField {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    /// Lists, maps and anything else a store might hand over
    Other(Value),
}

impl RawField {
    /// Integer view of the field, truncating fractions
    pub fn as_int(&self) -> i64 {
        match self {
            RawField::Bool(b) => i64::from(*b),
            RawField::Int(i) => *i,
            RawField::Float(f) => float_to_int(*f),
            RawField::Text(s) => coerce_int(s),
            RawField::Other(_) => 0,
        }
    }

    /// Decimal view of the field; non-finite values become zero
    pub fn as_decimal(&self) -> f64 {
        let value = match self {
            RawField::Bool(b) => f64::from(u8::from(*b)),
            RawField::Int(i) => *i as f64,
            RawField::Float(f) => *f,
            RawField::Text(s) => coerce_decimal(s),
            RawField::Other(_) => 0.0,
        };
        if value.is_finite() {
            value
        } else {
            0.0
        }
    }
}

/// Coerce a missing field to zero, a present one by its integer view
pub fn field_int(field: Option<&RawField>) -> i64 {
    field.map_or(0, RawField::as_int)
}

/// Coerce a missing field to zero, a present one by its decimal view
pub fn field_decimal(field: Option<&RawField>) -> f64 {
    field.map_or(0.0, RawField::as_decimal)
}

/// Leading-integer coercion: `"12abc"` is 12, `"3.9"` is 3, `"abc"` is 0
///
/// Values past the `i64` range saturate.
pub fn coerce_int(s: &str) -> i64 {
    let Some(caps) = INT_PREFIX.captures(s) else {
        return 0;
    };
    let negative = &caps[1] == "-";
    match caps[2].parse::<i64>() {
        Ok(n) if negative => -n,
        Ok(n) => n,
        Err(_) if negative => i64::MIN,
        Err(_) => i64::MAX,
    }
}

/// Leading-decimal coercion: `"7.50"` is 7.5, `"1e2"` is 100, `"x"` is 0
pub fn coerce_decimal(s: &str) -> f64 {
    DECIMAL_PREFIX
        .find(s)
        .and_then(|m| m.as_str().trim_start().parse::<f64>().ok())
        .filter(|f| f.is_finite())
        .unwrap_or(0.0)
}

fn float_to_int(f: f64) -> i64 {
    if f.is_nan() {
        0
    } else {
        // `as` truncates toward zero and saturates at the bounds
        f as i64
    }
}
