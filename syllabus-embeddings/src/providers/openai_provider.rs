//! OpenAI-compatible embedding provider.
//!
//! Blocking HTTP client with a bounded timeout and retry with exponential
//! backoff on rate limits and server errors.

use std::thread;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderValue, AUTHORIZATION};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use syllabus_core::config::EmbeddingConfig;
use syllabus_core::errors::{EmbeddingError, SyllabusResult};
use syllabus_core::traits::IEmbeddingProvider;
use tracing::{debug, warn};

/// Embeddings client for `POST {base_url}/embeddings`.
pub struct OpenAiEmbeddingProvider {
    client: Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
    max_retries: u32,
}

#[derive(Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Deserialize)]
struct EmbedResponse {
    data: Vec<EmbedData>,
}

#[derive(Deserialize)]
struct EmbedData {
    #[serde(default)]
    index: usize,
    embedding: Vec<f32>,
}

impl OpenAiEmbeddingProvider {
    pub fn new(config: &EmbeddingConfig) -> SyllabusResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| EmbeddingError::InferenceFailed {
                reason: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            endpoint: format!("{}/embeddings", config.base_url.trim_end_matches('/')),
            model: config.model.clone(),
            api_key: config
                .api_key
                .as_ref()
                .map(|k| k.trim().to_string())
                .filter(|k| !k.is_empty()),
            max_retries: config.max_retries,
        })
    }

    /// Send an embedding request with retry and exponential backoff.
    fn request_embeddings(&self, texts: &[String]) -> SyllabusResult<Vec<Vec<f32>>> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(EmbeddingError::ProviderUnavailable {
                provider: self.name().to_string(),
            }
            .into());
        };
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let auth = HeaderValue::from_str(&format!("Bearer {api_key}")).map_err(|_| {
            EmbeddingError::ProviderUnavailable {
                provider: format!("{} (invalid API key)", self.name()),
            }
        })?;

        let mut attempt = 0u32;
        loop {
            let response = self
                .client
                .post(&self.endpoint)
                .header(AUTHORIZATION, auth.clone())
                .json(&EmbedRequest {
                    model: &self.model,
                    input: texts,
                })
                .send();

            match response {
                Ok(resp) if resp.status().is_success() => {
                    let mut parsed: EmbedResponse =
                        resp.json().map_err(|e| EmbeddingError::InferenceFailed {
                            reason: format!("JSON parse error: {e}"),
                        })?;
                    parsed.data.sort_by_key(|d| d.index);
                    if parsed.data.len() != texts.len() {
                        return Err(EmbeddingError::InferenceFailed {
                            reason: format!(
                                "API returned {} embeddings for {} inputs",
                                parsed.data.len(),
                                texts.len()
                            ),
                        }
                        .into());
                    }
                    return Ok(parsed.data.into_iter().map(|d| d.embedding).collect());
                }
                Ok(resp) => {
                    let status = resp.status();
                    let body = resp
                        .text()
                        .unwrap_or_else(|_| "<body unavailable>".to_string());
                    if should_retry(status) && attempt < self.max_retries {
                        attempt += 1;
                        warn!(attempt, %status, "embedding request rejected, retrying");
                        thread::sleep(retry_backoff(attempt));
                        continue;
                    }
                    return Err(EmbeddingError::InferenceFailed {
                        reason: format!("API returned {status}: {body}"),
                    }
                    .into());
                }
                Err(e) => {
                    if (e.is_timeout() || e.is_connect()) && attempt < self.max_retries {
                        attempt += 1;
                        debug!(attempt, error = %e, "retrying embedding request");
                        thread::sleep(retry_backoff(attempt));
                        continue;
                    }
                    return Err(EmbeddingError::InferenceFailed {
                        reason: format!("HTTP error: {e}"),
                    }
                    .into());
                }
            }
        }
    }
}

fn should_retry(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
}

fn retry_backoff(attempt: u32) -> Duration {
    Duration::from_millis(250 * (1 << attempt.min(4)))
}

impl IEmbeddingProvider for OpenAiEmbeddingProvider {
    fn embed(&self, text: &str) -> SyllabusResult<Vec<f32>> {
        let results = self.request_embeddings(&[text.to_string()])?;
        results.into_iter().next().ok_or_else(|| {
            EmbeddingError::InferenceFailed {
                reason: "empty response".to_string(),
            }
            .into()
        })
    }

    fn embed_batch(&self, texts: &[String]) -> SyllabusResult<Vec<Vec<f32>>> {
        self.request_embeddings(texts)
    }

    fn name(&self) -> &str {
        "openai-embeddings"
    }

    fn is_available(&self) -> bool {
        self.api_key.is_some()
    }
}
