// File: src/rules.rs
// Purpose: Rule descriptors, rule tables and their merge

use crate::error::{FilterError, Result};
use crate::merge::merge_value;
use crate::value::Value;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Per-field rule: required-ness, pattern, default value and error message
///
/// The legacy key spellings `require`, `regex` and `errmsg` are accepted
/// when deserializing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleDescriptor {
    #[serde(alias = "require")]
    pub required: bool,

    /// Regular expression the whole rendered value must match
    #[serde(alias = "regex", skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,

    /// Substituted when the field is submitted with a falsy value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,

    /// Returned verbatim when the field is missing or fails its pattern
    #[serde(alias = "errmsg", alias = "errorMessage", skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl RuleDescriptor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn error_message(mut self, message: impl Into<String>) -> Self {
        self.error_message = Some(message.into());
        self
    }

    /// Declared pattern, if it is non-empty
    pub fn pattern_str(&self) -> Option<&str> {
        self.pattern.as_deref().filter(|p| !p.is_empty())
    }

    /// Declared default, if it is truthy
    pub fn truthy_default(&self) -> Option<&Value> {
        self.default.as_ref().filter(|d| d.is_truthy())
    }

    /// A descriptor is falsy when none of its parts carries anything
    pub fn is_truthy(&self) -> bool {
        self.required
            || self.pattern_str().is_some()
            || self.truthy_default().is_some()
            || self.error_message.as_deref().is_some_and(|m| !m.is_empty())
    }

    /// Merge `overrides` into a copy of this descriptor.
    ///
    /// Truthy override parts replace base parts; falsy ones are ignored, so an
    /// override cannot switch `required` off or blank a message.
    pub fn merged_with(&self, overrides: &RuleDescriptor) -> RuleDescriptor {
        let mut merged = self.clone();

        if overrides.required {
            merged.required = true;
        }
        if let Some(pattern) = overrides.pattern_str() {
            merged.pattern = Some(pattern.to_string());
        }
        if let Some(default) = overrides.truthy_default() {
            merged.default = Some(match &self.default {
                Some(base) => merge_value(base, default),
                None => default.clone(),
            });
        }
        if let Some(message) = overrides.error_message.as_deref().filter(|m| !m.is_empty()) {
            merged.error_message = Some(message.to_string());
        }

        merged
    }
}

/// Canonical field name to rule descriptor
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleTable(HashMap<String, RuleDescriptor>);

impl RuleTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn rule(mut self, name: impl Into<String>, descriptor: RuleDescriptor) -> Self {
        self.0.insert(name.into(), descriptor);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, descriptor: RuleDescriptor) {
        self.0.insert(name.into(), descriptor);
    }

    pub fn get(&self, name: &str) -> Option<&RuleDescriptor> {
        self.0.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &RuleDescriptor)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Deep merge `user` over `base`, returning a new table.
    ///
    /// Falsy user descriptors are discarded. Fields only in `user` are taken
    /// as-is, fields in both are merged part by part.
    pub fn merged(base: &RuleTable, user: &RuleTable) -> RuleTable {
        let mut merged = base.clone();

        for (name, overrides) in user.iter() {
            if !overrides.is_truthy() {
                continue;
            }

            let descriptor = match base.get(name) {
                Some(existing) => existing.merged_with(overrides),
                None => overrides.clone(),
            };
            merged.0.insert(name.clone(), descriptor);
        }

        merged
    }
}

impl<K: Into<String>> FromIterator<(K, RuleDescriptor)> for RuleTable {
    fn from_iter<I: IntoIterator<Item = (K, RuleDescriptor)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// A rule with its pattern compiled for full-string matching
#[derive(Debug, Clone)]
pub struct CompiledRule {
    descriptor: RuleDescriptor,
    matcher: Option<Regex>,
}

impl CompiledRule {
    pub fn compile(field: &str, descriptor: &RuleDescriptor) -> Result<Self> {
        let matcher = descriptor
            .pattern_str()
            .map(|pattern| {
                Regex::new(&format!(r"\A(?:{})\z", pattern)).map_err(|source| {
                    FilterError::InvalidPattern {
                        field: field.to_string(),
                        pattern: pattern.to_string(),
                        source,
                    }
                })
            })
            .transpose()?;

        Ok(Self {
            descriptor: descriptor.clone(),
            matcher,
        })
    }

    pub fn descriptor(&self) -> &RuleDescriptor {
        &self.descriptor
    }

    pub fn matcher(&self) -> Option<&Regex> {
        self.matcher.as_ref()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.descriptor.error_message.as_deref()
    }
}

/// Compiled form of a [`RuleTable`], built once per validator
#[derive(Debug, Clone, Default)]
pub struct CompiledRules(HashMap<String, CompiledRule>);

impl CompiledRules {
    pub fn compile(table: &RuleTable) -> Result<Self> {
        table
            .iter()
            .map(|(name, descriptor)| {
                CompiledRule::compile(name, descriptor).map(|rule| (name.clone(), rule))
            })
            .collect::<Result<HashMap<_, _>>>()
            .map(Self)
    }

    pub fn get(&self, name: &str) -> Option<&CompiledRule> {
        self.0.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &CompiledRule)> {
        self.0.iter()
    }
}
