//! Strategy parameter maps
//!
//! Parameters travel as a JSON object so callers can serialize overrides
//! straight from config files. Getters fall back to the caller-supplied
//! default when a key is absent and reject a value that is present but
//! of the wrong type, so a typo'd override fails loudly instead of
//! silently running with defaults.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Error;
use crate::Result;

/// A JSON object holding strategy parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Params(Map<String, Value>);

impl Params {
    pub fn new() -> Self {
        Params(Map::new())
    }

    /// Builder-style insert, used by the catalogue default tables.
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.0.insert(key.to_string(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// New map with `self` overriding `base` key by key.
    pub fn merged_over(&self, base: &Params) -> Params {
        let mut merged = base.0.clone();
        for (key, value) in &self.0 {
            merged.insert(key.clone(), value.clone());
        }
        Params(merged)
    }

    /// Integer parameter. Whole-number floats are accepted since JSON
    /// round-trips may widen integers.
    pub fn usize_or(&self, key: &str, default: usize) -> Result<usize> {
        match self.0.get(key) {
            None => Ok(default),
            Some(value) => {
                if let Some(n) = value.as_u64() {
                    return Ok(n as usize);
                }
                if let Some(f) = value.as_f64() {
                    if f.fract() == 0.0 && f >= 0.0 {
                        return Ok(f as usize);
                    }
                }
                Err(Error::BadParameter {
                    name: key.to_string(),
                    reason: format!("expected a non-negative integer, got {value}"),
                })
            }
        }
    }

    /// Float parameter; accepts any JSON number.
    pub fn f64_or(&self, key: &str, default: f64) -> Result<f64> {
        match self.0.get(key) {
            None => Ok(default),
            Some(value) => value.as_f64().ok_or_else(|| Error::BadParameter {
                name: key.to_string(),
                reason: format!("expected a number, got {value}"),
            }),
        }
    }

    /// Integer-list parameter (e.g. EMA ribbon lengths).
    pub fn usize_list_or(&self, key: &str, default: &[usize]) -> Result<Vec<usize>> {
        match self.0.get(key) {
            None => Ok(default.to_vec()),
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| {
                    item.as_u64().map(|n| n as usize).ok_or_else(|| Error::BadParameter {
                        name: key.to_string(),
                        reason: format!("expected a list of integers, got element {item}"),
                    })
                })
                .collect(),
            Some(value) => Err(Error::BadParameter {
                name: key.to_string(),
                reason: format!("expected a list of integers, got {value}"),
            }),
        }
    }
}

impl From<Map<String, Value>> for Params {
    fn from(map: Map<String, Value>) -> Self {
        Params(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_absent_key_falls_back() {
        let params = Params::new();
        assert_eq!(params.usize_or("rsi_period", 14).unwrap(), 14);
        assert_eq!(params.f64_or("rsi_level", 70.0).unwrap(), 70.0);
    }

    #[test]
    fn test_present_key_wins() {
        let params = Params::new().with("rsi_period", 7).with("rsi_level", 65.5);
        assert_eq!(params.usize_or("rsi_period", 14).unwrap(), 7);
        assert_eq!(params.f64_or("rsi_level", 70.0).unwrap(), 65.5);
    }

    #[test]
    fn test_whole_float_accepted_as_usize() {
        let params = Params::new().with("period", 20.0);
        assert_eq!(params.usize_or("period", 14).unwrap(), 20);
    }

    #[test]
    fn test_mistyped_value_is_rejected() {
        let params = Params::new().with("rsi_period", "fourteen");
        assert!(params.usize_or("rsi_period", 14).is_err());

        let params = Params::new().with("rsi_level", json!([70]));
        assert!(params.f64_or("rsi_level", 70.0).is_err());

        let params = Params::new().with("period", 14.5);
        assert!(params.usize_or("period", 14).is_err());
    }

    #[test]
    fn test_usize_list() {
        let params = Params::new().with("ema_lengths", vec![8, 13, 21]);
        assert_eq!(
            params.usize_list_or("ema_lengths", &[5, 10]).unwrap(),
            vec![8, 13, 21]
        );
        assert_eq!(params.usize_list_or("other", &[5, 10]).unwrap(), vec![5, 10]);

        let params = Params::new().with("ema_lengths", vec![json!(8), json!("x")]);
        assert!(params.usize_list_or("ema_lengths", &[]).is_err());
    }

    #[test]
    fn test_merged_over_prefers_overrides() {
        let defaults = Params::new().with("a", 1).with("b", 2);
        let overrides = Params::new().with("b", 9);
        let merged = overrides.merged_over(&defaults);
        assert_eq!(merged.usize_or("a", 0).unwrap(), 1);
        assert_eq!(merged.usize_or("b", 0).unwrap(), 9);
    }

    #[test]
    fn test_serializes_as_plain_object() {
        let params = Params::new().with("rsi_period", 14);
        let text = serde_json::to_string(&params).unwrap();
        assert_eq!(text, r#"{"rsi_period":14}"#);
    }
}
