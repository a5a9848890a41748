//! Main API entry point and its endpoint registry.

use std::collections::HashMap;
use std::sync::Arc;

use crate::{
    config::ClientConfig,
    endpoint::ResourceEndpoint,
    http::{HttpClient, ReqwestClient},
    query::{bounty_schema, FieldSchema},
    Error,
};

/// Registry id of the bounties list endpoint.
pub const BOUNTIES: &str = "bounties";

/// Builds the schema for a resource. Called once per [`Gitcoin::resource`].
pub trait SchemaFactory: Send + Sync {
    fn build_schema(&self) -> FieldSchema;
}

impl<F> SchemaFactory for F
where
    F: Fn() -> FieldSchema + Send + Sync,
{
    fn build_schema(&self) -> FieldSchema {
        self()
    }
}

/// Builds the endpoint for a resource from its URL and a freshly built schema.
pub trait EndpointFactory: Send + Sync {
    fn build_endpoint(
        &self,
        url: &str,
        schema: FieldSchema,
        http: Arc<dyn HttpClient>,
    ) -> ResourceEndpoint;
}

impl<F> EndpointFactory for F
where
    F: Fn(&str, FieldSchema, Arc<dyn HttpClient>) -> ResourceEndpoint + Send + Sync,
{
    fn build_endpoint(
        &self,
        url: &str,
        schema: FieldSchema,
        http: Arc<dyn HttpClient>,
    ) -> ResourceEndpoint {
        self(url, schema, http)
    }
}

/// Endpoint factory used unless overridden.
pub fn default_endpoint(url: &str, schema: FieldSchema, http: Arc<dyn HttpClient>) -> ResourceEndpoint {
    ResourceEndpoint::new(url, schema, http)
}

/// An injectable replacement for one part of a registry entry.
#[derive(Clone)]
pub enum Implementation {
    Endpoint(Arc<dyn EndpointFactory>),
    Schema(Arc<dyn SchemaFactory>),
}

impl Implementation {
    pub fn endpoint(factory: impl EndpointFactory + 'static) -> Self {
        Implementation::Endpoint(Arc::new(factory))
    }

    pub fn schema(factory: impl SchemaFactory + 'static) -> Self {
        Implementation::Schema(Arc::new(factory))
    }
}

#[derive(Clone)]
struct RegistryEntry {
    url: String,
    endpoint: Arc<dyn EndpointFactory>,
    schema: Arc<dyn SchemaFactory>,
}

impl RegistryEntry {
    fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
            endpoint: Arc::new(default_endpoint),
            schema: Arc::new(FieldSchema::new),
        }
    }
}

/// Client for the Gitcoin REST API.
///
/// Holds the URL and implementation registry per resource id and hands out a
/// fresh [`ResourceEndpoint`] on every access. Configure it before sharing;
/// after that it is only read.
#[derive(Clone)]
pub struct Gitcoin {
    registry: HashMap<String, RegistryEntry>,
    http: Arc<dyn HttpClient>,
}

impl Default for Gitcoin {
    fn default() -> Self {
        Self::new()
    }
}

impl Gitcoin {
    /// Creates a client pointing at the production Gitcoin API.
    pub fn new() -> Self {
        Self::from_config(&ClientConfig::default())
    }

    /// Creates a client using the URL and transport settings in `config`.
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::with_parts(config, Arc::new(ReqwestClient::new(config)))
    }

    /// Creates a client with a custom transport. Used for testing.
    pub fn with_http_client(http: Arc<dyn HttpClient>) -> Self {
        Self::with_parts(&ClientConfig::default(), http)
    }

    fn with_parts(config: &ClientConfig, http: Arc<dyn HttpClient>) -> Self {
        let mut bounties = RegistryEntry::new(&config.base_url);
        bounties.schema = Arc::new(bounty_schema);
        let mut registry = HashMap::new();
        registry.insert(BOUNTIES.to_string(), bounties);
        Self { registry, http }
    }

    /// Injects an implementation for resource `id`, overriding the default.
    ///
    /// Unknown ids are registered with no URL until [`Gitcoin::set_url`] is called.
    pub fn set_implementation(&mut self, id: &str, implementation: Implementation) -> &mut Self {
        let entry = self
            .registry
            .entry(id.to_string())
            .or_insert_with(|| RegistryEntry::new(""));
        match implementation {
            Implementation::Endpoint(factory) => entry.endpoint = factory,
            Implementation::Schema(factory) => entry.schema = factory,
        }
        self
    }

    /// Configures the URL for resource `id`, overriding the default.
    pub fn set_url(&mut self, id: &str, url: &str) -> &mut Self {
        self.registry
            .entry(id.to_string())
            .and_modify(|entry| entry.url = url.to_string())
            .or_insert_with(|| RegistryEntry::new(url));
        self
    }

    /// Current URL of resource `id`.
    pub fn url(&self, id: &str) -> Option<&str> {
        self.registry.get(id).map(|entry| entry.url.as_str())
    }

    /// Registered resource ids in alphabetical order.
    pub fn resource_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.registry.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Builds a new endpoint for resource `id` with empty parameters.
    pub fn resource(&self, id: &str) -> Result<ResourceEndpoint, Error> {
        let entry = self.registry.get(id).ok_or_else(|| Error::UnknownResource {
            id: id.to_string(),
        })?;
        let schema = entry.schema.build_schema();
        Ok(entry
            .endpoint
            .build_endpoint(&entry.url, schema, Arc::clone(&self.http)))
    }

    /// Wraps the `bounties` API endpoint.
    pub fn bounties(&self) -> Result<ResourceEndpoint, Error> {
        self.resource(BOUNTIES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{FieldRule, Query};
    use serde_json::{json, Value};

    struct Offline;

    impl HttpClient for Offline {
        fn get(&self, url: &str, _query: &[(String, String)]) -> Result<Value, Error> {
            Ok(json!({ "url": url }))
        }
    }

    fn client() -> Gitcoin {
        Gitcoin::with_http_client(Arc::new(Offline))
    }

    #[test]
    fn default_bounties_url() {
        assert_eq!(
            client().url(BOUNTIES),
            Some("https://gitcoin.co/api/v0.1/bounties/")
        );
        assert_eq!(client().resource_ids(), vec!["bounties"]);
    }

    #[test]
    fn each_access_builds_a_fresh_endpoint() {
        let api = client();
        let mut first = api.bounties().unwrap();
        first.filter_by("bounty_type", "Bug").unwrap();
        let second = api.bounties().unwrap();
        assert!(second.params().to_query_map().is_empty());
    }

    #[test]
    fn unknown_resource_fails() {
        let err = client().resource("grants").unwrap_err();
        assert!(matches!(err, Error::UnknownResource { id } if id == "grants"));
    }

    #[test]
    fn set_url_overrides_and_registers() {
        let mut api = client();
        api.set_url(BOUNTIES, "http://localhost:8000/bounties/")
            .set_url("grants", "http://localhost:8000/grants/");
        assert_eq!(api.bounties().unwrap().url(), "http://localhost:8000/bounties/");
        let grants = api.resource("grants").unwrap();
        assert_eq!(grants.url(), "http://localhost:8000/grants/");
        assert!(grants.schema().is_empty());
    }

    #[test]
    fn schema_override_does_not_leak_into_default() {
        let mut api = client();
        api.set_implementation(
            BOUNTIES,
            Implementation::schema(|| {
                bounty_schema().with_field("no_normalize", FieldRule::new(true, None))
            }),
        );
        assert!(api.bounties().unwrap().schema().has("no_normalize"));
        assert!(!client().bounties().unwrap().schema().has("no_normalize"));
        assert!(!bounty_schema().has("no_normalize"));
    }

    #[test]
    fn endpoint_override_is_used() {
        let mut api = client();
        api.set_implementation(
            BOUNTIES,
            Implementation::endpoint(|url: &str, schema: FieldSchema, http: Arc<dyn HttpClient>| {
                let mut endpoint = ResourceEndpoint::new(url, schema, http);
                endpoint.add_param_unchecked("network", "mainnet");
                endpoint
            }),
        );
        let endpoint = api.bounties().unwrap();
        assert_eq!(endpoint.params().values("network"), ["mainnet"]);
    }
}
