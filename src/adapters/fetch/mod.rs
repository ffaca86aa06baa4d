//! Profile fetch API client
//!
//! Wraps the external profile-fetch endpoint: one POST per profile URL,
//! bearer-token authenticated, with a configurable delay between requests.
//! Failures are collected per URL; a batch fetch never aborts on a single
//! bad profile.

use crate::config::FetchConfig;
use crate::domain::profile::RawProfile;
use crate::domain::{FetchError, Result};
use secrecy::ExposeSecret;
use serde::Serialize;
use std::time::Duration;

#[derive(Serialize)]
struct FetchRequest<'a> {
    #[serde(rename = "profileUrl")]
    profile_url: &'a str,
}

/// One failed URL within a batch fetch
#[derive(Debug, Clone)]
pub struct FetchFailure {
    pub url: String,
    pub error: String,
}

/// Result of fetching a batch of profile URLs
#[derive(Debug, Default)]
pub struct FetchBatch {
    pub profiles: Vec<RawProfile>,
    pub failures: Vec<FetchFailure>,
}

/// HTTP client for the external profile-fetch API
pub struct FetchClient {
    http: reqwest::Client,
    config: FetchConfig,
}

impl FetchClient {
    /// Create a client from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: FetchConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| FetchError::ConnectionFailed(e.to_string()))?;
        Ok(Self { http, config })
    }

    /// Fetch a single profile by its public URL
    ///
    /// # Errors
    ///
    /// Returns a [`FetchError`] describing connection, authentication,
    /// server, or decoding failures.
    pub async fn fetch_profile(&self, profile_url: &str) -> Result<RawProfile> {
        tracing::debug!(profile_url, "Fetching profile");

        let response = self
            .http
            .post(&self.config.endpoint)
            .bearer_auth::<&str>(self.config.api_token.expose_secret().as_ref())
            .json(&FetchRequest { profile_url })
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    FetchError::Timeout(e.to_string())
                } else {
                    FetchError::ConnectionFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            let error = match status.as_u16() {
                401 | 403 => FetchError::AuthenticationFailed(message),
                code if status.is_server_error() => FetchError::ServerError {
                    status: code,
                    message,
                },
                code => FetchError::ClientError {
                    status: code,
                    message,
                },
            };
            return Err(error.into());
        }

        let profile = response
            .json::<RawProfile>()
            .await
            .map_err(|e| FetchError::InvalidResponse(e.to_string()))?;
        Ok(profile)
    }

    /// Fetch a batch of profile URLs, collecting per-URL failures
    ///
    /// Requests are sequential with the configured inter-request delay so
    /// the upstream API is not hammered.
    pub async fn fetch_profiles(&self, urls: &[String]) -> FetchBatch {
        let mut batch = FetchBatch::default();

        for (index, url) in urls.iter().enumerate() {
            match self.fetch_profile(url).await {
                Ok(profile) => batch.profiles.push(profile),
                Err(e) => {
                    tracing::warn!(url = %url, error = %e, "Failed to fetch profile");
                    batch.failures.push(FetchFailure {
                        url: url.clone(),
                        error: e.to_string(),
                    });
                }
            }

            if index + 1 < urls.len() && self.config.request_delay_ms > 0 {
                tokio::time::sleep(Duration::from_millis(self.config.request_delay_ms)).await;
            }
        }

        tracing::info!(
            fetched = batch.profiles.len(),
            failed = batch.failures.len(),
            "Batch fetch finished"
        );
        batch
    }
}
