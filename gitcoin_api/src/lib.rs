//! Query-building client for the Gitcoin bounties REST API.
//!
//! ```no_run
//! use gitcoin_api::{Gitcoin, Page};
//!
//! # fn main() -> Result<(), gitcoin_api::Error> {
//! let api = Gitcoin::new();
//! let bounties = api
//!     .bounties()?
//!     .filter([("bounty_type", "Feature"), ("bounty_type", "Bug")])?
//!     .order_by("-web3_created")?
//!     .get_page(Page::default())?;
//! println!("{}", bounties);
//! # Ok(())
//! # }
//! ```

mod client;
pub mod config;
mod endpoint;
mod errors;
pub mod http;
pub mod query;
pub use self::client::{
    default_endpoint, EndpointFactory, Gitcoin, Implementation, SchemaFactory, BOUNTIES,
};
pub use self::config::ClientConfig;
pub use self::endpoint::{Page, ResourceEndpoint, DEFAULT_PER_PAGE};
pub use self::errors::Error;
pub use self::http::{HttpClient, ReqwestClient};
pub use self::query::{
    bounty_schema, FieldRule, FieldSchema, FilterValue, Normalizer, ParameterSet, Query,
};
