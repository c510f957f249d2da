//! HTTP client for location partitions.

use super::error::LocationError;
use super::record::LocationDto;

/// Configuration for the partition HTTP client.
#[derive(Debug, Clone)]
pub struct LocationClientConfig {
    /// Base URL under which `{partition}.json` files are served
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl LocationClientConfig {
    /// Create a new config for the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: 30,
        }
    }

    /// Set a custom request timeout.
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

/// Client that fetches location partitions over HTTP.
#[derive(Debug, Clone)]
pub struct LocationClient {
    http: reqwest::Client,
    base_url: String,
}

impl LocationClient {
    /// Create a new client.
    pub fn new(config: LocationClientConfig) -> Result<Self, LocationError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// URL of a named partition.
    pub fn partition_url(&self, partition: &str) -> String {
        format!("{}/{}.json", self.base_url, partition)
    }

    /// Fetch one partition's records.
    pub async fn fetch_partition(&self, partition: &str) -> Result<Vec<LocationDto>, LocationError> {
        let url = self.partition_url(partition);

        let response = self.http.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LocationError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| LocationError::Json {
            partition: partition.to_string(),
            message: e.to_string(),
        })
    }
}
