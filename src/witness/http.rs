//! HTTP witness client.
//!
//! Posts entry digests to a configured endpoint and parses the returned
//! witness proof. All transport, status, and decoding failures map to
//! `WitnessUnavailable` so callers can branch without inspecting message
//! text.

use std::time::Duration;

use serde::Serialize;

use crate::proof::Proof;
use crate::provider::Witness;
use crate::{Error, Result};

/// Default request deadline.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for an [`HttpWitness`].
#[derive(Clone, Debug)]
pub struct HttpWitnessConfig {
    /// Endpoint receiving `POST {"digest": …}` requests.
    pub url: String,

    /// Request deadline.
    pub timeout: Duration,
}

impl HttpWitnessConfig {
    /// Configuration with the default 30 second deadline.
    #[must_use]
    pub fn new(url: &str) -> Self {
        Self { url: url.to_string(), timeout: DEFAULT_TIMEOUT }
    }

    /// Override the request deadline.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Witness backed by an HTTP endpoint.
pub struct HttpWitness {
    config: HttpWitnessConfig,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct WitnessRequest<'a> {
    digest: &'a str,
}

impl HttpWitness {
    /// Create a witness client.
    ///
    /// # Errors
    ///
    /// Will fail with `WitnessUnavailable` if the HTTP client cannot be
    /// constructed.
    pub fn new(config: HttpWitnessConfig) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(config.timeout).build().map_err(|e| {
            Error::WitnessUnavailable {
                url: config.url.clone(),
                status_code: None,
                body: Some(e.to_string()),
            }
        })?;
        Ok(Self { config, client })
    }

    fn unavailable(&self, status_code: Option<u16>, body: Option<String>) -> Error {
        Error::WitnessUnavailable { url: self.config.url.clone(), status_code, body }
    }
}

impl Witness for HttpWitness {
    async fn witness(&self, digest: &str) -> Result<Proof> {
        let response = match self
            .client
            .post(&self.config.url)
            .json(&WitnessRequest { digest })
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::error!("witness request to {} failed: {e}", self.config.url);
                return Err(self.unavailable(None, Some(e.to_string())));
            }
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::trace!("witness at {} returned {status}", self.config.url);
            return Err(self.unavailable(Some(status.as_u16()), Some(body)));
        }

        let proof = response
            .json::<Proof>()
            .await
            .map_err(|e| self.unavailable(Some(status.as_u16()), Some(e.to_string())))?;

        if proof.type_.is_empty()
            || proof.cryptosuite.is_empty()
            || proof.proof_value.is_empty()
            || proof.witnessed_at.is_none()
        {
            return Err(self.unavailable(
                Some(status.as_u16()),
                Some("witness response is missing required proof fields".to_string()),
            ));
        }
        Ok(proof)
    }
}
