//! Accumulator for query parameters governed by a [`FieldSchema`].

use super::common::{FilterValue, Query};
use super::schema::FieldSchema;
use crate::Error;

type Entries = Vec<(String, Vec<String>)>;

/// Query parameters collected for one endpoint.
///
/// Values are kept per field in insertion order. Single-valued fields are
/// replaced on every insert and move to the end of the parameter list;
/// multi-valued fields accumulate in place.
#[derive(Clone, Debug)]
pub struct ParameterSet {
    schema: FieldSchema,
    entries: Entries,
}

impl ParameterSet {
    /// Creates an empty parameter set governed by `schema`.
    pub fn new(schema: FieldSchema) -> Self {
        Self {
            schema,
            entries: Vec::new(),
        }
    }

    pub fn schema(&self) -> &FieldSchema {
        &self.schema
    }

    /// Adds a value for a schema field.
    ///
    /// The value is normalized before anything is stored, so a rejected value
    /// leaves the set untouched.
    pub fn set_or_append(&mut self, name: &str, value: impl Into<FilterValue>) -> Result<(), Error> {
        insert_checked(&self.schema, &mut self.entries, name, value.into())
    }

    /// Applies several values at once. Either all of them are stored or, on
    /// the first error, none are.
    pub fn set_or_append_all<I, K, V>(&mut self, pairs: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<FilterValue>,
    {
        let mut staged = self.entries.clone();
        for (name, value) in pairs {
            insert_checked(&self.schema, &mut staged, name.as_ref(), value.into())?;
        }
        self.entries = staged;
        Ok(())
    }

    /// Appends a value without consulting the schema.
    ///
    /// Meant for API fields the schema does not model yet. It always appends,
    /// even for fields the schema declares single-valued, so a later
    /// `set_or_append` on such a field is the only way back to one value.
    pub fn append_unchecked(&mut self, name: &str, value: impl Into<FilterValue>) {
        if let Ok(rule) = self.schema.get(name) {
            if !rule.multi_valued {
                tracing::warn!("Appending unchecked value to single-valued param \"{}\"", name);
            }
        }
        push(&mut self.entries, name, value.into().to_string());
    }

    /// Deletes all values for `name`. No-op if absent.
    pub fn remove(&mut self, name: &str) {
        self.entries.retain(|(key, _)| key != name);
    }

    /// Deletes every parameter.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Values currently stored for `name`.
    pub fn values(&self, name: &str) -> &[String] {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, values)| values.as_slice())
            .unwrap_or(&[])
    }

    pub fn contains(&self, name: &str) -> bool {
        !self.values(name).is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.iter().all(|(_, values)| values.is_empty())
    }
}

impl Query for ParameterSet {
    /// Joins multiple values of one field with a comma.
    fn to_query_map(&self) -> Vec<(String, String)> {
        self.entries
            .iter()
            .filter(|(_, values)| !values.is_empty())
            .map(|(name, values)| (name.clone(), values.join(",")))
            .collect()
    }
}

fn insert_checked(
    schema: &FieldSchema,
    entries: &mut Entries,
    name: &str,
    value: FilterValue,
) -> Result<(), Error> {
    let rule = schema.get(name)?;
    let value = rule.apply(value)?;
    if !rule.multi_valued {
        entries.retain(|(key, _)| key != name);
    }
    push(entries, name, value.to_string());
    Ok(())
}

fn push(entries: &mut Entries, name: &str, value: String) {
    match entries.iter_mut().find(|(key, _)| key == name) {
        Some((_, values)) => values.push(value),
        None => entries.push((name.to_string(), vec![value])),
    }
}
