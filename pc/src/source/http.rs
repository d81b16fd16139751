//! HTTP implementation of the catalog data source
//!
//! Issues one GET per document against `{base_url}/{name}.json`. Transport
//! failures and non-success statuses are reported, never retried.

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info};

use super::{DataSource, Document, Endpoint, SourceError};
use crate::config::ApiConfig;

/// Catalog API client over HTTPS
pub struct HttpDataSource {
    base_url: String,
    http: Client,
}

impl HttpDataSource {
    /// Create a new client from configuration
    pub fn from_config(config: &ApiConfig) -> Result<Self, SourceError> {
        debug!(?config, "from_config: called");
        let http = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(SourceError::ClientBuild)?;

        Ok(Self {
            base_url: config.base_url.trim().trim_end_matches('/').to_string(),
            http,
        })
    }

    /// Full URL of one document
    pub fn url_for(&self, endpoint: Endpoint) -> String {
        format!("{}/{}.json", self.base_url, endpoint.name())
    }
}

#[async_trait]
impl DataSource for HttpDataSource {
    async fn fetch(&self, endpoint: Endpoint) -> Result<Document, SourceError> {
        let url = self.url_for(endpoint);
        debug!(%endpoint, %url, "fetch: called");

        let response = self
            .http
            .get(&url)
            .header("accept", "application/json")
            .send()
            .await
            .map_err(|source| SourceError::Network { endpoint, source })?;

        let status = response.status();
        if !status.is_success() {
            debug!(%endpoint, %status, "fetch: non-success status");
            return Err(SourceError::Status {
                endpoint,
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|source| SourceError::Network { endpoint, source })?;

        let document = Document::parse(endpoint, &body)?;
        info!(%endpoint, records = document.len(), "fetch: document loaded");
        Ok(document)
    }
}
