// File: src/config.rs
// Purpose: Rule and alias tables loaded from TOML or JSON

use crate::error::{FilterError, Result};
use crate::rules::RuleTable;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Filter configuration
///
/// ```toml
/// [rules.age]
/// required = true
/// pattern = "[0-9]+"
/// error_message = "numeric required"
///
/// [aliases]
/// edad = "age"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Built-in rules, overridden by `rules`
    #[serde(default)]
    pub base_rules: RuleTable,

    #[serde(default)]
    pub rules: RuleTable,

    /// Alias to canonical name
    #[serde(default)]
    pub aliases: BTreeMap<String, String>,
}

impl FilterConfig {
    /// Load configuration from a file (`.json` as JSON, anything else as TOML)
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // If file doesn't exist, return default config
        if !path.exists() {
            tracing::debug!(path = ?path, "config file not found, using empty config");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|source| FilterError::ReadConfig {
            path: path.to_path_buf(),
            source,
        })?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_toml_str(&content)
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::RuleDescriptor;
    use crate::value::Value;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_config() {
        let config = FilterConfig::from_toml_str("").unwrap();
        assert!(config.rules.is_empty());
        assert!(config.base_rules.is_empty());
        assert!(config.aliases.is_empty());
    }

    #[test]
    fn test_toml_rules_and_aliases() {
        let toml = r#"
            [rules.age]
            required = true
            pattern = "[0-9]+"
            default = 18
            error_message = "numeric required"

            [aliases]
            edad = "age"
        "#;
        let config = FilterConfig::from_toml_str(toml).unwrap();

        assert_eq!(
            config.rules.get("age"),
            Some(
                &RuleDescriptor::new()
                    .required()
                    .pattern("[0-9]+")
                    .default_value(18)
                    .error_message("numeric required")
            )
        );
        assert_eq!(config.aliases.get("edad").map(String::as_str), Some("age"));
    }

    #[test]
    fn test_json_legacy_keys() {
        let json = r#"{
            "base_rules": {"name": {"regex": ".+"}},
            "rules": {"real_name": {"require": true, "regex": "\\d*", "errmsg": "digits"}},
            "aliases": {"alias": "real_name"}
        }"#;
        let config = FilterConfig::from_json_str(json).unwrap();

        assert_eq!(
            config.base_rules.get("name").and_then(|r| r.pattern_str()),
            Some(".+")
        );
        let rule = config.rules.get("real_name").unwrap();
        assert!(rule.required);
        assert_eq!(rule.error_message.as_deref(), Some("digits"));
    }

    #[test]
    fn test_object_default_from_toml() {
        let toml = r#"
            [rules.address]
            pattern = ".*"
            default = { city = "Lima" }
        "#;
        let config = FilterConfig::from_toml_str(toml).unwrap();
        let default = config.rules.get("address").and_then(|r| r.default.clone()).unwrap();
        assert_eq!(default.as_object().map(|o| o["city"].clone()), Some(Value::from("Lima")));
    }

    #[test]
    fn test_load_missing_file_is_default() {
        let config = FilterConfig::load("definitely/not/here.toml").unwrap();
        assert_eq!(config, FilterConfig::default());
    }

    #[test]
    fn test_invalid_toml_is_reported() {
        let err = FilterConfig::from_toml_str("[rules.age\npattern = 1").unwrap_err();
        assert!(matches!(err, FilterError::Toml(_)));
    }
}
