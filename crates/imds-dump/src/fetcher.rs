//! Walks the metadata namespace one level deep.

use crate::client::HttpClient;
use crate::config::MetadataConfig;
use crate::types::{FetchError, FetchResult, KeyFailurePolicy, MetadataMap};

/// Fetches every top-level key and its value from a metadata endpoint.
pub struct MetadataFetcher {
    config: MetadataConfig,
    policy: KeyFailurePolicy,
    client: HttpClient,
}

impl MetadataFetcher {
    pub fn new(config: MetadataConfig) -> Self {
        Self {
            config,
            policy: KeyFailurePolicy::default(),
            client: HttpClient::new(),
        }
    }

    /// Set how non-success key responses are handled.
    pub fn with_policy(mut self, policy: KeyFailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Replace the HTTP client, e.g. one built with a shorter timeout.
    pub fn with_client(mut self, client: HttpClient) -> Self {
        self.client = client;
        self
    }

    pub fn config(&self) -> &MetadataConfig {
        &self.config
    }

    pub fn policy(&self) -> KeyFailurePolicy {
        self.policy
    }

    /// List the top-level keys, in the order the service returns them.
    pub async fn keys(&self) -> FetchResult<Vec<String>> {
        let url = self.config.base_url();
        let resp = self
            .client
            .get(&url)
            .await
            .map_err(|source| FetchError::Enumerate {
                url: url.clone(),
                source,
            })?;

        if !resp.is_success() {
            return Err(FetchError::EnumerateStatus {
                url,
                status: resp.status,
            });
        }

        Ok(parse_keys(&resp.body))
    }

    /// Enumerate keys, then fetch each value sequentially.
    ///
    /// Either every key gets an entry or an error is returned; a partial
    /// mapping is never produced.
    pub async fn fetch_all(&self) -> FetchResult<MetadataMap> {
        let keys = self.keys().await?;
        tracing::debug!(count = keys.len(), "enumerated metadata keys");

        let mut metadata = MetadataMap::new();
        for key in keys {
            let value = self.fetch_key(&key).await?;
            metadata.insert(key, value);
        }

        tracing::info!(
            keys = metadata.len(),
            base_url = %self.config.base_url(),
            "fetched instance metadata"
        );
        Ok(metadata)
    }

    async fn fetch_key(&self, key: &str) -> FetchResult<String> {
        let resp = self
            .client
            .get(&self.config.key_url(key))
            .await
            .map_err(|source| FetchError::Key {
                key: key.to_string(),
                source,
            })?;

        if resp.is_success() {
            return Ok(resp.body);
        }

        match self.policy {
            KeyFailurePolicy::Abort => Err(FetchError::KeyStatus {
                key: key.to_string(),
                status: resp.status,
            }),
            KeyFailurePolicy::Verbatim => {
                tracing::warn!(key, status = resp.status, "storing error response body as value");
                Ok(resp.body)
            }
        }
    }
}

/// Split an enumeration body into key names, one per non-empty line.
pub fn parse_keys(body: &str) -> Vec<String> {
    body.lines()
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
