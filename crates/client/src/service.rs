//! Outbound calls to the recommendation service.

use async_trait::async_trait;
use reqwest::Client;

use countryguide_core::RecommendationRequest;

use crate::config::ClientConfig;
use crate::error::ServiceError;

/// The external recommendation engine, as seen by the session.
///
/// Implementations return the raw body of a 2xx response; decoding and shape
/// checks happen in the session so every transport fails the same way.
#[async_trait]
pub trait RecommendationService: Send + Sync + 'static {
    async fn recommend(&self, request: &RecommendationRequest) -> Result<String, ServiceError>;
}

/// `reqwest` client for `POST {base_url}/api/v1/recommend`.
#[derive(Debug, Clone)]
pub struct HttpRecommendationService {
    client: Client,
    endpoint: String,
}

impl HttpRecommendationService {
    pub fn new(config: &ClientConfig) -> Result<Self, ServiceError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ServiceError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: config.recommend_url(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl RecommendationService for HttpRecommendationService {
    async fn recommend(&self, request: &RecommendationRequest) -> Result<String, ServiceError> {
        tracing::debug!(endpoint = %self.endpoint, "sending recommendation request");

        // `.json()` sets `Content-Type: application/json`.
        let resp = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| ServiceError::Transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ServiceError::Status(status.as_u16()));
        }

        resp.text()
            .await
            .map_err(|e| ServiceError::Transport(e.to_string()))
    }
}
