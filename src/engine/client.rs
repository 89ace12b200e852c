// HTTP client for the inference backend, with bounded retry

use super::{CompletionRequest, CompletionResponse, EngineConfig, EngineError, EngineInitError};
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

/// Inference client shared by agent variants
#[derive(Debug, Clone)]
pub struct Engine {
    config: EngineConfig,
    client: Client,
}

impl Engine {
    /// Create a new Engine from configuration
    pub fn new(config: EngineConfig) -> Result<Self, EngineInitError> {
        if config.endpoint.is_empty() {
            return Err(EngineInitError::ConfigInvalid(
                "endpoint must not be empty".into(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        debug!(
            endpoint = %config.endpoint,
            model = %config.model,
            timeout_secs = config.request_timeout_secs,
            "engine initialized"
        );

        Ok(Self { config, client })
    }

    /// Model identifier this engine completes with
    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Maximum output tokens per completion
    pub fn max_output_tokens(&self) -> u32 {
        self.config.max_output_tokens
    }

    /// Temperature override, if configured
    pub fn temperature(&self) -> Option<f32> {
        self.config.temperature
    }

    /// Run a completion request, retrying transient failures with backoff
    pub async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, EngineError> {
        let start = Instant::now();
        let mut retries = 0;
        let base_delay = Duration::from_millis(self.config.base_retry_delay_ms);

        loop {
            debug!(retry = retries, model = %request.model, "sending completion request");
            match self.send_request(&request).await {
                Ok(response) => {
                    let (input_tokens, output_tokens) = response
                        .usage
                        .map(|u| (u.input_tokens, u.output_tokens))
                        .unwrap_or((0, 0));

                    info!(
                        model = %response.model,
                        input_tokens = input_tokens,
                        output_tokens = output_tokens,
                        latency_ms = start.elapsed().as_millis() as u64,
                        retries = retries,
                        stop_reason = ?response.stop_reason,
                        "completion succeeded"
                    );
                    return Ok(response);
                }
                Err(e) => {
                    retries += 1;
                    if retries > self.config.max_retries {
                        error!(
                            retries = retries,
                            total_latency_ms = start.elapsed().as_millis() as u64,
                            error = %e,
                            "completion failed, retries exhausted"
                        );
                        return Err(EngineError::Exhausted {
                            retries,
                            last_error: e.to_string(),
                        });
                    }

                    let multiplier = 2u64.saturating_pow(retries - 1);
                    let delay_ms = (base_delay.as_millis() as u64 * multiplier).min(30_000);

                    warn!(
                        retry = retries,
                        max_retries = self.config.max_retries,
                        delay_ms = delay_ms,
                        error = %e,
                        "completion failed, retrying"
                    );

                    tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                }
            }
        }
    }

    async fn send_request(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, EngineError> {
        let url = format!(
            "{}/v1/messages",
            self.config.endpoint.trim_end_matches('/')
        );

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", &self.config.api_key))
            .header("anthropic-version", "2023-06-01")
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await?;

        let status = response.status();
        debug!(status = status.as_u16(), "backend response received");

        if status.is_success() {
            let body = response.text().await?;
            let parsed: CompletionResponse = serde_json::from_str(&body)?;
            Ok(parsed)
        } else {
            let body = response.text().await.unwrap_or_default();
            match status.as_u16() {
                401 => Err(EngineError::AuthenticationFailed(body)),
                402 => Err(EngineError::InsufficientBalance(body)),
                400 => Err(EngineError::InvalidRequest(body)),
                code if status.is_server_error() => {
                    debug!(status = code, "backend server error");
                    Err(EngineError::ModelError(body))
                }
                code => Err(EngineError::InvalidRequest(format!(
                    "HTTP {}: {}",
                    code, body
                ))),
            }
        }
    }
}
