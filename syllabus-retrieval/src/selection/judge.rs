//! OpenAI-compatible chat completion judge.

use std::sync::Arc;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderValue, AUTHORIZATION};
use serde::{Deserialize, Serialize};
use syllabus_core::config::SelectorConfig;
use syllabus_core::errors::{JudgeError, SyllabusResult};
use syllabus_core::traits::IRelevanceJudge;
use tracing::{debug, info, warn};

/// Chat client for `POST {base_url}/chat/completions`. No retries: a failed
/// call sends the selector down the top-1 path.
pub struct OpenAiChatJudge {
    client: Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
    max_tokens: u32,
    response_format: ResponseFormat,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

impl OpenAiChatJudge {
    pub fn new(config: &SelectorConfig) -> SyllabusResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| JudgeError::RequestFailed {
                reason: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            endpoint: format!("{}/chat/completions", config.base_url.trim_end_matches('/')),
            model: config.model.clone(),
            api_key: config
                .api_key
                .as_ref()
                .map(|k| k.trim().to_string())
                .filter(|k| !k.is_empty()),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }

    pub fn is_available(&self) -> bool {
        self.api_key.is_some()
    }
}

impl IRelevanceJudge for OpenAiChatJudge {
    fn complete(&self, system_prompt: &str, user_prompt: &str) -> SyllabusResult<String> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(JudgeError::Unavailable {
                judge: self.name().to_string(),
            }
            .into());
        };
        let auth = HeaderValue::from_str(&format!("Bearer {api_key}")).map_err(|_| {
            JudgeError::Unavailable {
                judge: format!("{} (invalid API key)", self.name()),
            }
        })?;

        let request = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: user_prompt,
                },
            ],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            response_format: ResponseFormat {
                kind: "json_object",
            },
        };

        let resp = self
            .client
            .post(&self.endpoint)
            .header(AUTHORIZATION, auth)
            .json(&request)
            .send()
            .map_err(|e| JudgeError::RequestFailed {
                reason: format!("HTTP error: {e}"),
            })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp
                .text()
                .unwrap_or_else(|_| "<body unavailable>".to_string());
            return Err(JudgeError::RequestFailed {
                reason: format!("API returned {status}: {body}"),
            }
            .into());
        }

        let parsed: ChatResponse = resp.json().map_err(|e| JudgeError::MalformedResponse {
            reason: format!("JSON parse error: {e}"),
        })?;
        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|c| !c.trim().is_empty())
            .ok_or(JudgeError::EmptyResponse)?;
        debug!(chars = content.len(), "judge responded");
        Ok(content)
    }

    fn name(&self) -> &str {
        "openai-chat"
    }
}

/// Build the configured judge, `None` when selection is disabled.
pub fn create_judge(config: &SelectorConfig) -> Option<Arc<dyn IRelevanceJudge>> {
    if !config.enabled {
        info!("relevance judge disabled by configuration");
        return None;
    }
    match OpenAiChatJudge::new(config) {
        Ok(judge) => {
            if !judge.is_available() {
                warn!("no API key configured, selection will take the top candidate");
            }
            Some(Arc::new(judge))
        }
        Err(e) => {
            warn!(error = %e, "failed to create relevance judge");
            None
        }
    }
}
