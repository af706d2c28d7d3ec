// File: src/alias.rs
// Purpose: Alias to canonical field name translation and its inverse

use crate::error::{FilterError, Result};
use crate::value::Record;
use std::collections::HashMap;

/// Alias name to canonical name, plus the inverse used for error keys
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AliasTable {
    forward: HashMap<String, String>,
    inverse: HashMap<String, String>,
}

impl AliasTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(alias, canonical)` pairs.
    ///
    /// Fails when a canonical name is empty. When several aliases share a
    /// canonical name, the last pair wins in the inverse table.
    pub fn from_pairs<I, A, C>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (A, C)>,
        A: Into<String>,
        C: Into<String>,
    {
        let mut table = Self::new();

        for (alias, canonical) in pairs {
            let alias = alias.into();
            let canonical = canonical.into();

            if canonical.is_empty() {
                tracing::warn!(alias = %alias, "alias maps to an empty canonical name");
                return Err(FilterError::EmptyAliasTarget { alias });
            }

            table.inverse.insert(canonical.clone(), alias.clone());
            table.forward.insert(alias, canonical);
        }

        Ok(table)
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    pub fn len(&self) -> usize {
        self.forward.len()
    }

    /// Canonical target for an alias, if `name` is one
    pub fn canonical(&self, name: &str) -> Option<&str> {
        self.forward.get(name).map(String::as_str)
    }

    /// Alias that maps to `canonical`, if any
    pub fn alias_for(&self, canonical: &str) -> Option<&str> {
        self.inverse.get(canonical).map(String::as_str)
    }

    /// Name a caller used for `canonical`: its alias if one exists, else itself
    pub fn display_name<'a>(&'a self, canonical: &'a str) -> &'a str {
        self.alias_for(canonical).unwrap_or(canonical)
    }

    /// Rewrite alias keys of `data` to their canonical names.
    pub fn resolve(&self, data: &Record) -> Record {
        resolve_aliases(data, self)
    }
}

/// Rewrite alias keys to canonical names; unknown keys pass through unchanged.
///
/// When an alias and its canonical name are both submitted, the canonical
/// key wins. Between two aliases of the same field, the one sorting last wins.
pub fn resolve_aliases(data: &Record, aliases: &AliasTable) -> Record {
    if aliases.is_empty() {
        return data.clone();
    }

    let mut entries: Vec<(&String, _)> = data.iter().collect();
    entries.sort_by(|(a, _), (b, _)| {
        let a_aliased = aliases.canonical(a).is_some();
        let b_aliased = aliases.canonical(b).is_some();
        // Aliased keys first so direct canonical keys overwrite them
        b_aliased.cmp(&a_aliased).then_with(|| a.cmp(b))
    });

    let mut resolved = Record::with_capacity(data.len());
    for (name, value) in entries {
        let key = aliases.canonical(name).unwrap_or(name.as_str());
        resolved.insert(key.to_string(), value.clone());
    }

    resolved
}
