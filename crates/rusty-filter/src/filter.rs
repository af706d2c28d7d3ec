// File: src/filter.rs
// Purpose: Public validator composing rule merge, alias resolution and checks

use crate::alias::AliasTable;
use crate::config::FilterConfig;
use crate::engine;
use crate::error::Result;
use crate::outcome::Filtered;
use crate::rules::{CompiledRules, RuleTable};
use crate::value::Record;

/// Declares the rules for one kind of record
///
/// ```rust
/// use rusty_filter::{Filter, FilterSchema, RuleDescriptor, RuleTable};
///
/// struct UserFilter;
///
/// impl FilterSchema for UserFilter {
///     fn rules() -> RuleTable {
///         RuleTable::new().rule(
///             "age",
///             RuleDescriptor::new()
///                 .required()
///                 .pattern("[0-9]+")
///                 .error_message("numeric required"),
///         )
///     }
///
///     fn aliases() -> Vec<(&'static str, &'static str)> {
///         vec![("edad", "age")]
///     }
/// }
///
/// let filter = Filter::for_schema::<UserFilter>().unwrap();
/// assert_eq!(filter.aliases().canonical("edad"), Some("age"));
/// ```
pub trait FilterSchema {
    /// User rules; these win over [`FilterSchema::base_rules`]
    fn rules() -> RuleTable;

    /// `(alias, canonical)` pairs
    fn aliases() -> Vec<(&'static str, &'static str)> {
        Vec::new()
    }

    /// Built-in rules the user table is merged over
    fn base_rules() -> RuleTable {
        RuleTable::new()
    }
}

/// Validator for submitted records
///
/// Rules are merged and compiled once at construction and are read-only
/// afterwards, so one `Filter` can be shared across threads and called any
/// number of times.
#[derive(Debug, Clone)]
pub struct Filter {
    rules: RuleTable,
    compiled: CompiledRules,
    aliases: AliasTable,
}

impl Filter {
    pub fn new(rules: RuleTable, aliases: AliasTable) -> Result<Self> {
        let compiled = CompiledRules::compile(&rules)?;

        tracing::debug!(
            rules = rules.len(),
            aliases = aliases.len(),
            "filter constructed"
        );

        Ok(Self {
            rules,
            compiled,
            aliases,
        })
    }

    /// Merge `rules` over the built-in `base` table, then build
    pub fn with_base(base: &RuleTable, rules: &RuleTable, aliases: AliasTable) -> Result<Self> {
        Self::new(RuleTable::merged(base, rules), aliases)
    }

    pub fn for_schema<S: FilterSchema>() -> Result<Self> {
        let aliases = AliasTable::from_pairs(S::aliases())?;
        Self::with_base(&S::base_rules(), &S::rules(), aliases)
    }

    pub fn from_config(config: FilterConfig) -> Result<Self> {
        let aliases = AliasTable::from_pairs(config.aliases)?;
        Self::with_base(&config.base_rules, &config.rules, aliases)
    }

    /// Resolve aliases, apply defaults, enforce required fields and check patterns.
    ///
    /// Invalid user input is `Ok(Filtered::Invalid(..))`; `Err` only signals a
    /// broken rule table.
    pub fn validate(&self, data: &Record) -> Result<Filtered> {
        let resolved = self.aliases.resolve(data);
        engine::check(resolved, &self.compiled, &self.aliases)
    }

    /// Merged rule table
    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }
}
