//! # Prediction Client
//!
//! Talks to the styling backend: one multipart `POST` per submission carrying
//! the photo (`file`), the gender preference (`gender`) and the occasion
//! (`occasion`). The JSON answer is returned as-is; deciding between success
//! and failure is left to the submission controller.
//!
//! ## Status Codes
//!
//! The backend reports its own failures (no face found, model errors) as a
//! `{"success": false, "error": ...}` body with a 4xx/5xx status. The body is
//! therefore parsed whatever the status, and only a body that is not the
//! documented JSON shape counts as a transport error.
//!
//! ## Testing
//!
//! [`PredictionService`] is the seam for tests: it is annotated for `mockall`,
//! and the generated `MockPredictionService` is exported under the
//! `test-export-mocks` feature for integration tests.

use async_trait::async_trait;
#[cfg(any(test, feature = "test-export-mocks"))]
use mockall::automock;
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use tracing::{error, info, warn};

use crate::config::Config;
use crate::error::StyleError;
use crate::models::{PredictRequest, PredictResponse};

/// The network call behind a submission
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait PredictionService: Send + Sync {
    /// Sends the photo and preferences, returning the decoded response body
    async fn predict(&self, request: &PredictRequest) -> Result<PredictResponse, StyleError>;
}

/// reqwest implementation of [`PredictionService`]
pub struct HttpPredictionClient {
    /// Reusable HTTP client, pooled connections across submissions
    client: Client,
    endpoint: String,
}

impl HttpPredictionClient {
    pub fn new(config: &Config) -> Result<Self, StyleError> {
        let mut builder = Client::builder().user_agent(config.user_agent.as_str());
        if config.no_proxy {
            builder = builder.no_proxy();
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn form(request: &PredictRequest) -> Result<Form, StyleError> {
        let photo = Part::bytes(request.file.bytes.clone())
            .file_name(request.file.name.clone())
            .mime_str(&request.file.mime_type)?;

        Ok(Form::new()
            .part("file", photo)
            .text("gender", request.gender.as_str())
            .text("occasion", request.occasion.clone()))
    }
}

#[async_trait]
impl PredictionService for HttpPredictionClient {
    async fn predict(&self, request: &PredictRequest) -> Result<PredictResponse, StyleError> {
        info!(
            "Posting {} ({} bytes) to {} for {} / {}",
            request.file.name,
            request.file.bytes.len(),
            self.endpoint,
            request.gender,
            request.occasion
        );

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(Self::form(request)?)
            .send()
            .await
            .map_err(|e| {
                error!("Prediction request failed: {}", e);
                StyleError::from(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!("Prediction endpoint answered {}", status);
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            error!("Unreadable prediction response ({}): {}", status, e);
            StyleError::Transport {
                message: format!("unreadable response ({status}): {e}"),
            }
        })
    }
}

impl Clone for HttpPredictionClient {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            endpoint: self.endpoint.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Gender, SelectedFile};

    fn request(mime: &str) -> PredictRequest {
        PredictRequest {
            file: SelectedFile {
                name: "me.png".to_string(),
                mime_type: mime.to_string(),
                bytes: vec![1, 2, 3],
            },
            gender: Gender::Female,
            occasion: "Wedding".to_string(),
        }
    }

    #[test]
    fn client_uses_configured_endpoint() {
        let config = Config {
            endpoint: "http://localhost:9/predict".to_string(),
            ..Config::default()
        };
        let client = HttpPredictionClient::new(&config).unwrap();
        assert_eq!(client.endpoint(), "http://localhost:9/predict");
        assert_eq!(client.clone().endpoint(), "http://localhost:9/predict");
    }

    #[test]
    fn form_builds_for_valid_mime() {
        assert!(HttpPredictionClient::form(&request("image/png")).is_ok());
    }

    #[test]
    fn form_rejects_malformed_mime() {
        let err = HttpPredictionClient::form(&request("not a mime")).unwrap_err();
        assert!(matches!(err, StyleError::Transport { .. }));
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_a_transport_error() {
        let config = Config {
            endpoint: "http://127.0.0.1:9/predict".to_string(),
            no_proxy: true,
            ..Config::default()
        };
        let client = HttpPredictionClient::new(&config).unwrap();
        let err = client.predict(&request("image/png")).await.unwrap_err();
        assert!(matches!(err, StyleError::Transport { .. }));
    }
}
