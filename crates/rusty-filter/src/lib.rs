//! # rusty-filter
//!
//! Declarative field filtering for submitted records (web forms, query
//! strings, decoded JSON bodies).
//!
//! A [`Filter`] is built from a rule table and an alias table. Each call to
//! [`Filter::validate`]:
//!
//! 1. rewrites alias keys to canonical field names
//! 2. substitutes defaults for fields submitted with an empty value
//! 3. reports missing required fields (and stops there)
//! 4. matches every remaining field that has a rule against its pattern
//!
//! ```rust
//! use rusty_filter::{AliasTable, Filter, Record, RuleDescriptor, RuleTable, Value};
//!
//! let rules = RuleTable::new().rule(
//!     "age",
//!     RuleDescriptor::new().required().pattern("[0-9]+").error_message("numeric required"),
//! );
//! let aliases = AliasTable::from_pairs([("edad", "age")]).unwrap();
//! let filter = Filter::new(rules, aliases).unwrap();
//!
//! let mut data = Record::new();
//! data.insert("edad".to_string(), Value::from("abc"));
//!
//! let outcome = filter.validate(&data).unwrap();
//! assert_eq!(outcome.get_error("edad"), Some("numeric required"));
//! ```
//!
//! Errors meant for end users come back inside [`Filtered::Invalid`].
//! [`FilterError`] is reserved for broken configuration.

pub mod alias;
pub mod config;
pub mod engine;
pub mod error;
pub mod filter;
pub mod merge;
pub mod outcome;
pub mod rules;
pub mod value;

pub use alias::{resolve_aliases, AliasTable};
pub use config::FilterConfig;
pub use error::{FilterError, Result};
pub use filter::{Filter, FilterSchema};
pub use merge::deep_merge;
pub use outcome::{FieldErrors, Filtered};
pub use rules::{CompiledRule, CompiledRules, RuleDescriptor, RuleTable};
pub use value::{Map, Record, Value};
