//! Fluent builder bound to one resource collection URL.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use url::Url;

use crate::{
    http::HttpClient,
    query::{FieldSchema, FilterValue, ParameterSet, Query},
    Error,
};

/// Default number of results per page.
pub const DEFAULT_PER_PAGE: i64 = 25;

const PAGINATION_PARAMS: [&str; 2] = ["limit", "offset"];

/// One page of a list request, 1-indexed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Page {
    pub number: i64,
    pub per_page: i64,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            number: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

impl Page {
    pub fn new(number: i64, per_page: i64) -> Self {
        Self { number, per_page }
    }

    /// Page `number` with the default page size.
    pub fn number(number: i64) -> Self {
        Self {
            number,
            ..Self::default()
        }
    }

    pub fn with_per_page(mut self, per_page: i64) -> Self {
        self.per_page = per_page;
        self
    }

    pub fn limit(&self) -> i64 {
        self.per_page
    }

    /// Number of results skipped before this page.
    ///
    /// Fails when the page is out of range or the offset does not fit in an `i64`.
    pub fn offset(&self) -> Result<i64, Error> {
        self.validate()?;
        (self.number - 1)
            .checked_mul(self.per_page)
            .ok_or_else(|| Error::validation("page", self.number))
    }

    fn validate(&self) -> Result<(), Error> {
        if self.number < 1 {
            return Err(Error::validation("page", self.number));
        }
        if self.per_page < 1 {
            return Err(Error::validation("per_page", self.per_page));
        }
        Ok(())
    }
}

/// Wraps one API end point.
///
/// Filters, ordering and pagination mutate the endpoint's own
/// [`ParameterSet`]; `get_page`, `all` and `get` send the request.
/// An endpoint is meant for sequential use by a single owner.
#[derive(Clone)]
pub struct ResourceEndpoint {
    url: String,
    params: ParameterSet,
    http: Arc<dyn HttpClient>,
}

impl fmt::Debug for ResourceEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceEndpoint")
            .field("url", &self.url)
            .field("params", &self.params.to_query_map())
            .finish()
    }
}

impl ResourceEndpoint {
    /// Binds `url` and `schema`, starting with no query parameters.
    pub fn new(url: &str, schema: FieldSchema, http: Arc<dyn HttpClient>) -> Self {
        Self {
            url: url.to_string(),
            params: ParameterSet::new(schema),
            http,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn schema(&self) -> &FieldSchema {
        self.params.schema()
    }

    pub fn params(&self) -> &ParameterSet {
        &self.params
    }

    pub fn params_mut(&mut self) -> &mut ParameterSet {
        &mut self.params
    }

    /// Filters the result set by `(field, value)` pairs, applied in order.
    ///
    /// Fails on the first unknown field or rejected value, in which case none
    /// of the pairs are applied.
    pub fn filter<I, K, V>(&mut self, pairs: I) -> Result<&mut Self, Error>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<FilterValue>,
    {
        self.params.set_or_append_all(pairs)?;
        Ok(self)
    }

    /// Filters by a single field.
    pub fn filter_by(&mut self, name: &str, value: impl Into<FilterValue>) -> Result<&mut Self, Error> {
        self.params.set_or_append(name, value)?;
        Ok(self)
    }

    /// Sorts the result set. Prefix the field with `-` for descending order.
    pub fn order_by(&mut self, sort: &str) -> Result<&mut Self, Error> {
        self.params.set_or_append("order_by", sort)?;
        Ok(self)
    }

    /// Adds a query parameter without schema checks or normalization.
    ///
    /// Useful when the API has fields this client does not know about yet.
    /// Always appends, even to fields the schema declares single-valued.
    pub fn add_param_unchecked(&mut self, name: &str, value: impl Into<FilterValue>) -> &mut Self {
        self.params.append_unchecked(name, value);
        self
    }

    /// Deletes a query parameter.
    pub fn del_param(&mut self, name: &str) -> &mut Self {
        self.params.remove(name);
        self
    }

    /// Deletes all query parameters.
    pub fn reset_params(&mut self) -> &mut Self {
        self.params.clear();
        self
    }

    /// Gets one page of the resources list.
    pub fn get_page(&mut self, page: Page) -> Result<Value, Error> {
        paginate(&mut self.params, page)?;
        self.request(&self.url, &self.params.to_query_map())
    }

    /// Lists all resources, dropping any pagination set by `get_page`.
    pub fn all(&mut self) -> Result<Value, Error> {
        for name in PAGINATION_PARAMS {
            self.params.remove(name);
        }
        self.request(&self.url, &self.params.to_query_map())
    }

    /// Retrieves one resource by primary key.
    ///
    /// The key is appended to the endpoint URL. Current filters are sent along,
    /// pagination parameters are not.
    pub fn get(&self, primary_key: impl fmt::Display) -> Result<Value, Error> {
        self.request(&self.item_url(primary_key), &self.unpaginated_query())
    }

    /// The URL a list request would hit with the current parameters.
    pub fn request_url(&self) -> Result<Url, Error> {
        build_url(&self.url, &self.params.to_query_map())
    }

    /// The URL `get_page(page)` would hit, without touching the parameter set.
    pub fn page_url(&self, page: Page) -> Result<Url, Error> {
        let mut params = self.params.clone();
        paginate(&mut params, page)?;
        build_url(&self.url, &params.to_query_map())
    }

    /// The URL `all()` would hit.
    pub fn all_url(&self) -> Result<Url, Error> {
        build_url(&self.url, &self.unpaginated_query())
    }

    /// The URL `get(primary_key)` would hit.
    pub fn get_url(&self, primary_key: impl fmt::Display) -> Result<Url, Error> {
        build_url(&self.item_url(primary_key), &self.unpaginated_query())
    }

    fn item_url(&self, primary_key: impl fmt::Display) -> String {
        format!("{}{}", self.url, primary_key)
    }

    fn unpaginated_query(&self) -> Vec<(String, String)> {
        self.params
            .to_query_map()
            .into_iter()
            .filter(|(name, _)| !PAGINATION_PARAMS.contains(&name.as_str()))
            .collect()
    }

    fn request(&self, url: &str, query: &[(String, String)]) -> Result<Value, Error> {
        tracing::debug!("Requesting {} with {} params", url, query.len());
        self.http.get(url, query)
    }
}

/// Sets `limit` and `offset` for `page`. Nothing changes if the page is invalid.
fn paginate(params: &mut ParameterSet, page: Page) -> Result<(), Error> {
    let offset = page.offset()?;
    params.set_or_append("limit", page.limit())?;
    params.set_or_append("offset", offset)?;
    Ok(())
}

fn build_url(base: &str, query: &[(String, String)]) -> Result<Url, Error> {
    let mut url = Url::parse(base).map_err(|e| {
        tracing::error!("Invalid endpoint URL {}: {}", base, e);
        Error::RequestFailed
    })?;
    if !query.is_empty() {
        url.query_pairs_mut().extend_pairs(query.iter());
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_page() {
        let page = Page::default();
        assert_eq!((page.limit(), page.offset().unwrap()), (25, 0));
    }

    #[test]
    fn page_offsets() {
        assert_eq!(Page::new(3, 10).offset().unwrap(), 20);
        assert_eq!(Page::number(2).offset().unwrap(), 25);
        assert_eq!(Page::number(4).with_per_page(5).limit(), 5);
    }

    #[test]
    fn page_below_one_is_invalid() {
        assert!(Page::new(0, 25).validate().is_err());
        assert!(Page::new(1, 0).validate().is_err());
        assert!(Page::new(1, 1).validate().is_ok());
    }

    #[test]
    fn page_offset_overflow_is_invalid() {
        let err = Page::new(i64::MAX, 2).offset().unwrap_err();
        assert!(matches!(err, Error::Validation { ref field, .. } if field == "page"));
        assert!(Page::new(i64::MAX, 1).offset().is_ok());
        assert!(Page::new(0, 25).offset().is_err());
    }
}
