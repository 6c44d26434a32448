use reqwest::{Response, Url};
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::{
    config::HttpSettings,
    models::{OakError, Result},
    services::resilience::{retry_with_backoff, RetryConfig},
};

/// Shared HTTP plumbing for every external service: one pooled client with
/// a request timeout, plus the retry policy.
#[derive(Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    retry: RetryConfig,
}

impl HttpClient {
    pub fn new(settings: &HttpSettings) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_seconds))
            .user_agent(settings.user_agent.clone())
            .build()
            .map_err(|e| OakError::ConfigError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            retry: RetryConfig::with_attempts(settings.max_attempts),
        })
    }

    pub async fn get(&self, url: &str) -> Result<Response> {
        self.get_authorized(url, None).await
    }

    pub async fn get_authorized(&self, url: &str, bearer: Option<&str>) -> Result<Response> {
        debug!("GET {}", url);
        let response = retry_with_backoff(&self.retry, url, || {
            let request = self.client.get(url);
            match bearer {
                Some(token) => request.bearer_auth(token).send(),
                None => request.send(),
            }
        })
        .await?;

        Ok(response)
    }

    pub async fn post_json<B: Serialize + ?Sized>(&self, url: &str, body: &B) -> Result<Response> {
        debug!("POST {}", url);
        let response = retry_with_backoff(&self.retry, url, || {
            self.client.post(url).json(body).send()
        })
        .await?;

        Ok(response)
    }

    /// GET a JSON resource where any non-200 answer means "unknown".
    pub async fn get_optional_json<T: DeserializeOwned>(&self, url: &str) -> Result<Option<T>> {
        let response = self.get(url).await?;
        if response.status() != reqwest::StatusCode::OK {
            debug!("{} answered {}", url, response.status());
            return Ok(None);
        }

        let body = response.text().await?;
        Ok(Some(serde_json::from_str(&body)?))
    }
}

/// Append `segment` to `base` as one percent-encoded path segment, keeping
/// a trailing slash when the base has one.
pub fn resource_url(base: &str, segment: &str) -> Result<Url> {
    let mut url = Url::parse(base)
        .map_err(|e| OakError::ConfigError(format!("Invalid base URL {}: {}", base, e)))?;
    let trailing_slash = base.ends_with('/');

    {
        let mut segments = url
            .path_segments_mut()
            .map_err(|_| OakError::ConfigError(format!("URL cannot be a base: {}", base)))?;
        segments.pop_if_empty().push(segment);
        if trailing_slash {
            segments.push("");
        }
    }

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_url_keeps_trailing_slash() {
        let url = resource_url("https://pokeapi.co/api/v2/pokemon/", "pikachu").unwrap();
        assert_eq!(url.as_str(), "https://pokeapi.co/api/v2/pokemon/pikachu/");
    }

    #[test]
    fn test_resource_url_encodes_segment() {
        let url = resource_url("https://pokeapi.co/api/v2/item", "../admin?x=1").unwrap();
        assert_eq!(url.as_str(), "https://pokeapi.co/api/v2/item/..%2Fadmin%3Fx=1");
    }

    #[test]
    fn test_http_client_builds_from_settings() {
        let settings = crate::config::Settings::default();
        assert!(HttpClient::new(&settings.http).is_ok());
    }
}
