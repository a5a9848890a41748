//! HTTP transport used by endpoints to fire GET requests.

use std::time::Duration;

use serde_json::Value;
use url::Url;

use crate::{config::ClientConfig, Error};

/// Performs a GET and decodes the JSON body.
///
/// Implementations must fail with [`Error::HttpStatus`] on a non-success status.
pub trait HttpClient: Send + Sync {
    fn get(&self, url: &str, query: &[(String, String)]) -> Result<Value, Error>;
}

/// Blocking transport backed by `reqwest`.
///
/// Each request builds a fresh `reqwest::blocking::Client` with the configured
/// timeout and user agent.
#[derive(Clone, Debug)]
pub struct ReqwestClient {
    timeout: Duration,
    user_agent: String,
}

impl Default for ReqwestClient {
    fn default() -> Self {
        Self::new(&ClientConfig::default())
    }
}

impl ReqwestClient {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            timeout: config.timeout,
            user_agent: config.user_agent.clone(),
        }
    }
}

impl HttpClient for ReqwestClient {
    fn get(&self, url: &str, query: &[(String, String)]) -> Result<Value, Error> {
        let mut url = Url::parse(url).map_err(|e| {
            tracing::error!("Invalid URL {}: {}", url, e);
            Error::RequestFailed
        })?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query.iter());
        }
        tracing::debug!("GET {} ({} params)", url, query.len());

        let client = reqwest::blocking::Client::builder()
            .user_agent(self.user_agent.as_str())
            .timeout(self.timeout)
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                Error::RequestFailed
            })?;
        let resp = client
            .get(url)
            .header("accept", "application/json")
            .send()
            .map_err(|e| {
                tracing::error!("Failed to get resource: {}", e);
                Error::RequestFailed
            })?;

        let status = resp.status();
        if !status.is_success() {
            let snippet = match resp.text() {
                Ok(body) => truncate_body(&body),
                Err(e) => {
                    tracing::warn!("Failed to read error body: {}", e);
                    String::new()
                }
            };
            tracing::error!("Request failed with status {}: {}", status, snippet);
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body: snippet,
            });
        }

        let body = resp.text().map_err(|e| {
            tracing::error!("Failed to read response body: {}", e);
            Error::RequestFailed
        })?;

        serde_json::from_str::<Value>(&body).map_err(|e| {
            tracing::error!("Failed to parse resource: {} | body: {}", e, truncate_body(&body));
            Error::RequestFailed
        })
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        return body.to_string();
    }
    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...[truncated]", &body[..end])
}
