use reqwest::{Client, Response};

use summit_types::api::AuthErrorBody;

use crate::config::BackendConfig;
use crate::error::ClientError;
use crate::table::TableQuery;

/// Handle to the hosted backend. Cheap to clone (the inner HTTP client is
/// reference-counted); most consumers hold it in an `Arc` anyway.
#[derive(Clone)]
pub struct Backend {
    http: Client,
    config: BackendConfig,
}

impl Backend {
    pub fn new(config: BackendConfig) -> Self {
        Self {
            http: Client::new(),
            config,
        }
    }

    /// Convenience constructor for the common case.
    pub fn from_env() -> Result<Self, ClientError> {
        Ok(Self::new(BackendConfig::from_env()?))
    }

    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    /// Start a query against one of the relational collections.
    pub fn table(&self, name: &str) -> TableQuery<'_> {
        TableQuery::new(self, name)
    }

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }

    pub(crate) fn anon_key(&self) -> &str {
        &self.config.anon_key
    }

    /// Absolute URL for a backend path. The base URL is normalized so a
    /// trailing slash in the configuration doesn't produce `//` paths.
    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!(
            "{}{}",
            self.config.base_url.as_str().trim_end_matches('/'),
            path
        )
    }
}

/// Turn a non-success response into a `ClientError::Api`, pulling the
/// human-readable message out of the JSON error body when there is one.
pub(crate) async fn api_error(resp: Response) -> ClientError {
    let status = resp.status();
    let body = resp.text().await.unwrap_or_default();

    let message = serde_json::from_str::<AuthErrorBody>(&body)
        .ok()
        .and_then(|parsed| parsed.message().map(str::to_owned))
        .unwrap_or_else(|| format!("request failed with status {status}"));

    ClientError::Api { status, message }
}
