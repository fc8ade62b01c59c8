//! HTTP prediction client -- POSTs the answer record as JSON.

use reqwest::Client;
use std::time::Duration;
use url::Url;

use super::traits::Predictor;
use crate::error::{ConfigError, PredictionError};
use crate::questionnaire::AnswerRecord;
use crate::storage::PredictionConfig;

pub struct HttpPredictor {
    client: Client,
    endpoint: Url,
    label_field: String,
}

impl HttpPredictor {
    /// Build a client for `endpoint`, reading the label from `label_field`.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint is not an http(s) URL or the
    /// HTTP client cannot be constructed.
    pub fn new(
        endpoint: &str,
        label_field: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ConfigError> {
        let invalid = |message: String| ConfigError::InvalidValue {
            key: "prediction.endpoint".into(),
            message,
        };
        let endpoint = Url::parse(endpoint).map_err(|e| invalid(e.to_string()))?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme '{}'", endpoint.scheme())));
        }
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| invalid(e.to_string()))?;
        Ok(Self {
            client,
            endpoint,
            label_field: label_field.into(),
        })
    }

    pub fn from_config(config: &PredictionConfig) -> Result<Self, ConfigError> {
        Self::new(
            &config.endpoint,
            config.label_field.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Pull the label out of a response body.
    fn extract_label(&self, body: &serde_json::Value) -> Result<String, PredictionError> {
        if !body.is_object() {
            return Err(PredictionError::MalformedBody(format!(
                "expected a JSON object, got {body}"
            )));
        }
        body.get(&self.label_field)
            .and_then(|v| v.as_str())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .ok_or_else(|| PredictionError::MissingLabel(self.label_field.clone()))
    }
}

impl Predictor for HttpPredictor {
    fn name(&self) -> &str {
        "http"
    }

    async fn predict(&self, record: &AnswerRecord) -> Result<String, PredictionError> {
        let resp = self
            .client
            .post(self.endpoint.clone())
            .json(record)
            .send()
            .await
            .map_err(|e| PredictionError::Transport(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(PredictionError::Status(resp.status().as_u16()));
        }

        let text = resp
            .text()
            .await
            .map_err(|e| PredictionError::Transport(e.to_string()))?;
        let body: serde_json::Value = serde_json::from_str(&text)
            .map_err(|e| PredictionError::MalformedBody(e.to_string()))?;

        self.extract_label(&body)
    }
}
