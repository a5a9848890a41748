//! Shared query infrastructure: the [`Query`] trait and [`FilterValue`].

use std::fmt;

use url::Url;

/// Trait implemented by anything that can be flattened into query parameters.
pub trait Query {
    /// Returns the query parameters as ordered `(name, value)` pairs, one per field.
    fn to_query_map(&self) -> Vec<(String, String)>;

    /// Appends this query's parameters to the given URL, returning the modified URL.
    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        let pairs = self.to_query_map();
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs.iter());
        }
        url
    }
}

/// A raw value handed to a filter before normalization.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FilterValue {
    Text(String),
    Integer(i64),
    Boolean(bool),
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterValue::Text(s) => write!(f, "{}", s),
            FilterValue::Integer(n) => write!(f, "{}", n),
            // The bounties API was built against Python-style booleans.
            FilterValue::Boolean(true) => write!(f, "True"),
            FilterValue::Boolean(false) => write!(f, "False"),
        }
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        FilterValue::Text(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        FilterValue::Text(value)
    }
}

impl From<&String> for FilterValue {
    fn from(value: &String) -> Self {
        FilterValue::Text(value.clone())
    }
}

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        FilterValue::Boolean(value)
    }
}

macro_rules! impl_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for FilterValue {
                fn from(value: $ty) -> Self {
                    FilterValue::Integer(value as i64)
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

macro_rules! impl_from_wide_int {
    ($($ty:ty),*) => {
        $(
            /// Values outside the `i64` range become text, which integer fields reject.
            impl From<$ty> for FilterValue {
                fn from(value: $ty) -> Self {
                    i64::try_from(value)
                        .map(FilterValue::Integer)
                        .unwrap_or_else(|_| FilterValue::Text(value.to_string()))
                }
            }
        )*
    };
}

impl_from_wide_int!(u64, usize, isize);
