//! OpenAI-compatible chat completion client (blocking).

use super::{GenerationRequest, Generator};
use crate::errors::{AppError, AppResult};
use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::{Value, json};
use std::time::Duration;
use tracing::{debug, warn};

pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

pub struct OpenAiClient {
    api_key: String,
    api_base: String,
    model: String,
    client: Client,
}

impl OpenAiClient {
    /// `timeout_secs == 0` means the request may block indefinitely.
    pub fn new(api_key: &str, api_base: &str, model: &str, timeout_secs: u64) -> AppResult<Self> {
        let timeout = (timeout_secs > 0).then(|| Duration::from_secs(timeout_secs));
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Generation(e.to_string()))?;

        Ok(Self {
            api_key: api_key.to_string(),
            api_base: api_base.trim_end_matches('/').to_string(),
            model: model.to_string(),
            client,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.api_base)
    }

    /// Request body: style-flavoured system message plus text and inline image.
    pub fn build_payload(&self, req: &GenerationRequest<'_>) -> Value {
        json!({
            "model": self.model,
            "messages": [
                {
                    "role": "system",
                    "content": system_prompt(req.style),
                },
                {
                    "role": "user",
                    "content": [
                        { "type": "text", "text": user_prompt(req.product_name) },
                        { "type": "image_url", "image_url": { "url": req.image.data_url() } },
                    ],
                },
            ],
        })
    }
}

pub fn system_prompt(style: &str) -> String {
    format!("你是一個專業 FB 團購主，用{style}語氣寫文案。")
}

pub fn user_prompt(product_name: &str) -> String {
    format!("商品：{product_name}，請寫文案")
}

impl Generator for OpenAiClient {
    fn generate(&self, req: &GenerationRequest<'_>) -> AppResult<String> {
        let url = self.endpoint();
        debug!(%url, model = %self.model, image = %req.image.file_name, "sending generation request");

        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&self.build_payload(req))
            .send()
            .map_err(|e| AppError::Generation(e.to_string()))?;

        let status = resp.status();
        let body = resp
            .text()
            .map_err(|e| AppError::Generation(e.to_string()))?;
        debug!(status = status.as_u16(), bytes = body.len(), "generation response");

        if !status.is_success() {
            warn!(status = status.as_u16(), "generation service returned an error");
            let msg = serde_json::from_str::<ErrorBody>(&body)
                .map(|b| b.error.message)
                .unwrap_or_else(|_| status.to_string());
            return Err(AppError::Generation(msg));
        }

        parse_completion(&body)
    }
}

/// Extract `choices[0].message.content` from a completion body.
pub fn parse_completion(body: &str) -> AppResult<String> {
    let parsed: ChatResponse = serde_json::from_str(body)?;
    parsed
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .ok_or_else(|| AppError::Generation("the service returned no content".into()))
}
