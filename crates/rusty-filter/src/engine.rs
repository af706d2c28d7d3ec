// File: src/engine.rs
// Purpose: Default substitution, required-field check and pattern validation

use crate::alias::AliasTable;
use crate::error::{FilterError, Result};
use crate::outcome::{FieldErrors, Filtered};
use crate::rules::CompiledRules;
use crate::value::Record;
use tracing::{debug, trace, warn};

/// Validate an alias-resolved record against compiled rules.
///
/// Steps run in a fixed order:
/// 1. Fields submitted with a falsy value get the rule's truthy default.
///    Absent fields are never filled in.
/// 2. If any required field is absent, only the missing fields are reported
///    (keyed by canonical name) and no pattern is checked.
/// 3. Every submitted field with a rule must match its pattern. Failures are
///    keyed by the caller's alias when one exists. Fields without a rule are
///    dropped from both result maps.
///
/// A submitted field whose rule has no pattern is a configuration error.
pub fn check(mut data: Record, rules: &CompiledRules, aliases: &AliasTable) -> Result<Filtered> {
    let mut required = Vec::new();

    for (name, rule) in rules.iter() {
        let descriptor = rule.descriptor();

        if let (Some(current), Some(default)) = (data.get_mut(name), descriptor.truthy_default()) {
            if !current.is_truthy() {
                debug!(field = %name, "substituting default for empty value");
                *current = default.clone();
            }
        }

        if descriptor.required {
            required.push(name.as_str());
        }
    }

    let mut missing: Vec<&str> = required
        .into_iter()
        .filter(|name| !data.contains_key(*name))
        .collect();

    if !missing.is_empty() {
        missing.sort_unstable();
        debug!(fields = ?missing, "required fields missing");

        let errors: FieldErrors = missing
            .into_iter()
            .map(|name| {
                let message = rules.get(name).and_then(|rule| rule.error_message());
                (name.to_string(), message.map(str::to_owned))
            })
            .collect();
        return Ok(Filtered::Invalid(errors));
    }

    let mut entries: Vec<_> = data.into_iter().collect();
    entries.sort_by(|(a, _), (b, _)| a.cmp(b));

    let mut errors = FieldErrors::new();
    let mut valid = Record::new();

    for (name, value) in entries {
        let Some(rule) = rules.get(&name) else {
            trace!(field = %name, "no rule, dropping field");
            continue;
        };

        let Some(matcher) = rule.matcher() else {
            warn!(field = %name, "submitted field has a rule without a pattern");
            return Err(FilterError::MissingPattern { field: name, value });
        };

        if matcher.is_match(&value.to_match_string()) {
            valid.insert(name, value);
        } else {
            let key = aliases.display_name(&name).to_string();
            debug!(field = %name, reported_as = %key, "pattern mismatch");
            errors.insert(key, rule.error_message().map(str::to_owned));
        }
    }

    if errors.is_empty() {
        Ok(Filtered::Valid(valid))
    } else {
        Ok(Filtered::Invalid(errors))
    }
}
