use url::Url;

use crate::error::ClientError;

/// Local development fallbacks, same spirit as a `.env` checked into a dev
/// machine. Production deployments always set the environment variables.
const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:54321";
const DEFAULT_ANON_KEY: &str = "dev-anon-key-change-me";

/// Connection settings for the hosted backend.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    pub base_url: Url,
    /// Project API key sent with every request; doubles as the bearer token
    /// for anonymous (public-site) operations.
    pub anon_key: String,
}

impl BackendConfig {
    pub fn new(base_url: &str, anon_key: impl Into<String>) -> Result<Self, ClientError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ClientError::Config(format!("invalid backend URL '{base_url}': {e}")))?;
        Ok(Self {
            base_url,
            anon_key: anon_key.into(),
        })
    }

    /// Read configuration from the environment (`SUMMIT_BACKEND_URL`,
    /// `SUMMIT_ANON_KEY`), loading `.env` first if present.
    pub fn from_env() -> Result<Self, ClientError> {
        let _ = dotenvy::dotenv();

        let base_url =
            std::env::var("SUMMIT_BACKEND_URL").unwrap_or_else(|_| DEFAULT_BACKEND_URL.into());
        let anon_key =
            std::env::var("SUMMIT_ANON_KEY").unwrap_or_else(|_| DEFAULT_ANON_KEY.into());

        Self::new(&base_url, anon_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_garbage_url() {
        let err = BackendConfig::new("not a url", "key").unwrap_err();
        assert!(matches!(err, ClientError::Config(_)));
    }

    #[test]
    fn accepts_https_url() {
        let config = BackendConfig::new("https://project.example.co", "key").unwrap();
        assert_eq!(config.base_url.scheme(), "https");
    }
}
