// File: src/merge.rs
// Purpose: Deep merge of nested mappings with override precedence

use crate::value::{Map, Value};

/// Deep merge `overrides` into a copy of `base`.
///
/// - Nested mappings present on both sides are merged key by key (overrides win on leaves)
/// - Any other override value replaces the base value outright
/// - A falsy override (null, false, 0, empty string/array/mapping) is discarded,
///   so it never removes or blanks a base entry
///
/// Neither input is modified.
pub fn deep_merge(base: &Map, overrides: &Map) -> Map {
    let mut merged = base.clone();

    for (key, value) in overrides {
        if !value.is_truthy() {
            continue;
        }

        if let (Some(Value::Object(existing)), Value::Object(nested)) =
            (merged.get_mut(key), value)
        {
            *existing = deep_merge(existing, nested);
            continue;
        }

        merged.insert(key.clone(), value.clone());
    }

    merged
}

/// Merge two values: mappings merge deeply, truthy overrides replace, falsy ones are ignored
pub fn merge_value(base: &Value, overrides: &Value) -> Value {
    match (base, overrides) {
        (Value::Object(b), Value::Object(o)) => Value::Object(deep_merge(b, o)),
        (_, o) if o.is_truthy() => o.clone(),
        (b, _) => b.clone(),
    }
}
