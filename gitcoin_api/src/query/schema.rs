//! Field schema: which filters an endpoint accepts and how their values are normalized.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::common::FilterValue;
use crate::Error;

/// Validates and/or transforms a raw value before it is stored.
pub type Normalizer = Arc<dyn Fn(FilterValue) -> Result<FilterValue, Error> + Send + Sync>;

/// Rule for a single named field.
#[derive(Clone)]
pub struct FieldRule {
    /// Repeated filters accumulate when `true`, replace when `false`.
    pub multi_valued: bool,
    pub normalize: Option<Normalizer>,
}

impl FieldRule {
    pub fn new(multi_valued: bool, normalize: Option<Normalizer>) -> Self {
        Self {
            multi_valued,
            normalize,
        }
    }

    /// A field whose repeated values replace each other.
    pub fn single(normalize: Normalizer) -> Self {
        Self::new(false, Some(normalize))
    }

    /// A field whose repeated values accumulate.
    pub fn multi(normalize: Normalizer) -> Self {
        Self::new(true, Some(normalize))
    }

    /// Runs the normalizer, if any, over `value`.
    pub fn apply(&self, value: FilterValue) -> Result<FilterValue, Error> {
        match &self.normalize {
            Some(normalize) => normalize(value),
            None => Ok(value),
        }
    }
}

impl fmt::Debug for FieldRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldRule")
            .field("multi_valued", &self.multi_valued)
            .field("normalize", &self.normalize.is_some())
            .finish()
    }
}

/// Mapping from field name to [`FieldRule`].
///
/// Each instance owns its rules. Extending a schema clones it first, so
/// additions never show up in the schema it was derived from.
#[derive(Clone, Debug, Default)]
pub struct FieldSchema {
    rules: HashMap<String, FieldRule>,
}

impl FieldSchema {
    /// Creates a schema with no fields.
    pub fn new() -> Self {
        Self::default()
    }

    /// Tells if a rule for `name` was defined.
    pub fn has(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    /// Returns the rule for `name`.
    pub fn get(&self, name: &str) -> Result<&FieldRule, Error> {
        self.rules.get(name).ok_or_else(|| Error::UnknownField {
            name: name.to_string(),
        })
    }

    /// Adds a field, returning the schema for chaining.
    pub fn with_field(mut self, name: &str, rule: FieldRule) -> Self {
        self.insert(name, rule);
        self
    }

    /// Adds or replaces the rule for `name`.
    pub fn insert(&mut self, name: &str, rule: FieldRule) {
        self.rules.insert(name.to_string(), rule);
    }

    /// Returns an independent copy of this schema with `rule` added under `name`.
    pub fn extend(&self, name: &str, rule: FieldRule) -> Self {
        self.clone().with_field(name, rule)
    }

    /// Field names in alphabetical order.
    pub fn field_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.rules.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
