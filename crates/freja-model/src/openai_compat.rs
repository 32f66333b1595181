// Copyright (c) 2025-2026 Freja Contributors
//
// SPDX-License-Identifier: MIT
//! Shared driver for OpenAI-compatible chat completion APIs.
//!
//! Every hosted provider in the registry speaks the same
//! `/chat/completions` wire format, so a single non-streaming driver
//! serves all of them, configured with its endpoint and key.
//!
//! Transient failures (network errors, 429, 5xx) are retried with a short
//! exponential backoff up to the configured budget; other 4xx statuses are
//! fatal on the first occurrence.

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::{ChatRequest, ChatResponse, ContentPart, Message, ModelError, Role};

/// Base delay doubled on each retry attempt.
const RETRY_BASE_DELAY_MS: u64 = 250;

pub struct OpenAiCompatModel {
    /// Provider id from the registry (e.g. `"groq"`).
    driver_name: &'static str,
    model: String,
    /// Pre-resolved key; `None` for local servers.
    api_key: Option<String>,
    /// Full chat completions URL.
    chat_url: String,
    temperature: Option<f32>,
    /// Only ever `Some` with a non-empty value; serialised into the body
    /// when present and omitted entirely otherwise.
    reasoning_effort: Option<String>,
    max_retries: u32,
    client: reqwest::Client,
}

impl OpenAiCompatModel {
    pub fn new(
        driver_name: &'static str,
        model: String,
        api_key: Option<String>,
        base_url: &str,
        temperature: Option<f32>,
        reasoning_effort: Option<String>,
        max_retries: u32,
    ) -> Self {
        let base = base_url.trim_end_matches('/');
        Self {
            driver_name,
            model,
            api_key,
            chat_url: format!("{base}/chat/completions"),
            temperature,
            reasoning_effort,
            max_retries,
            client: reqwest::Client::new(),
        }
    }

    fn request_body(&self, req: &ChatRequest) -> Value {
        let mut body = json!({
            "model": self.model,
            "messages": req.messages.iter().map(wire_message).collect::<Vec<_>>(),
        });
        if let Some(t) = self.temperature {
            body["temperature"] = json!(t);
        }
        if let Some(effort) = &self.reasoning_effort {
            body["reasoning_effort"] = json!(effort);
        }
        if let Some(schema) = &req.schema {
            body["response_format"] = json!({
                "type": "json_schema",
                "json_schema": {
                    "name": schema.name,
                    "schema": schema.schema,
                    "strict": true,
                }
            });
        }
        body
    }
}

#[async_trait]
impl crate::ChatModel for OpenAiCompatModel {
    fn provider(&self) -> &str {
        self.driver_name
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    async fn invoke(&self, req: ChatRequest) -> Result<ChatResponse, ModelError> {
        let body = self.request_body(&req);
        debug!(
            provider = self.driver_name,
            model = %self.model,
            messages = req.messages.len(),
            "chat completion request"
        );

        let mut attempt: u32 = 0;
        loop {
            let mut http = self.client.post(&self.chat_url).json(&body);
            if let Some(key) = &self.api_key {
                http = http.bearer_auth(key);
            }

            let outcome = match http.send().await {
                Ok(resp) => {
                    let status = resp.status();
                    if status.is_success() {
                        let payload: Value = resp.json().await?;
                        return extract_text(&payload);
                    }
                    let retryable = status.as_u16() == 429 || status.is_server_error();
                    let body_text = resp.text().await.unwrap_or_default();
                    (retryable, ModelError::Status { status: status.as_u16(), body: body_text })
                }
                Err(e) => (true, ModelError::Http(e)),
            };

            let (retryable, err) = outcome;
            if !retryable || attempt >= self.max_retries {
                return Err(err);
            }
            let delay = RETRY_BASE_DELAY_MS << attempt.min(6);
            warn!(
                provider = self.driver_name,
                attempt = attempt + 1,
                delay_ms = delay,
                error = %err,
                "transient provider failure, retrying"
            );
            tokio::time::sleep(std::time::Duration::from_millis(delay)).await;
            attempt += 1;
        }
    }
}

fn extract_text(payload: &Value) -> Result<ChatResponse, ModelError> {
    let text = payload["choices"][0]["message"]["content"]
        .as_str()
        .ok_or(ModelError::EmptyResponse)?;
    if text.is_empty() {
        return Err(ModelError::EmptyResponse);
    }
    Ok(ChatResponse { text: text.to_string() })
}

/// Serialise one [`Message`] into the provider wire format.
///
/// A single text part collapses to a plain string `content`; anything else
/// becomes a content-part array.  Inline binaries travel as data URLs.
fn wire_message(msg: &Message) -> Value {
    let role = match msg.role {
        Role::System => "system",
        Role::User => "user",
    };

    if let Some(text) = msg.as_text() {
        return json!({ "role": role, "content": text });
    }

    let parts: Vec<Value> = msg
        .content
        .iter()
        .map(|p| match p {
            ContentPart::Text { text } => json!({ "type": "text", "text": text }),
            ContentPart::ImageBase64 { data, mime_type } => json!({
                "type": "image_url",
                "image_url": { "url": format!("data:{mime_type};base64,{data}") }
            }),
            ContentPart::ImageUrl { url } => json!({
                "type": "image_url",
                "image_url": { "url": url }
            }),
            ContentPart::File { data, mime_type, filename } => json!({
                "type": "file",
                "file": {
                    "filename": filename,
                    "file_data": format!("data:{mime_type};base64,{data}")
                }
            }),
        })
        .collect();

    json!({ "role": role, "content": parts })
}

// ─── Unit tests ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ResponseSchema;

    fn model(reasoning: Option<&str>) -> OpenAiCompatModel {
        OpenAiCompatModel::new(
            "openai",
            "gpt-4o".into(),
            Some("sk-test".into()),
            "https://api.openai.com/v1/",
            Some(0.2),
            reasoning.map(String::from),
            3,
        )
    }

    #[test]
    fn chat_url_is_derived_from_base() {
        let m = model(None);
        assert_eq!(m.chat_url, "https://api.openai.com/v1/chat/completions");
    }

    #[test]
    fn body_omits_reasoning_effort_when_absent() {
        let m = model(None);
        let body = m.request_body(&ChatRequest::new(vec![Message::user("hi")]));
        assert!(body.get("reasoning_effort").is_none());
        assert_eq!(body["temperature"], json!(0.2));
    }

    #[test]
    fn body_includes_reasoning_effort_when_present() {
        let m = model(Some("high"));
        let body = m.request_body(&ChatRequest::new(vec![Message::user("hi")]));
        assert_eq!(body["reasoning_effort"], json!("high"));
    }

    #[test]
    fn body_includes_response_format_for_schema() {
        let m = model(None);
        let req = ChatRequest::new(vec![Message::user("hi")]).with_schema(ResponseSchema::new(
            "analysis",
            json!({ "type": "object" }),
        ));
        let body = m.request_body(&req);
        assert_eq!(body["response_format"]["type"], json!("json_schema"));
        assert_eq!(body["response_format"]["json_schema"]["name"], json!("analysis"));
    }

    #[test]
    fn wire_message_collapses_single_text_part() {
        let v = wire_message(&Message::user("hello"));
        assert_eq!(v, json!({ "role": "user", "content": "hello" }));
    }

    #[test]
    fn wire_message_encodes_image_as_data_url() {
        let m = Message::user_with_parts(vec![
            ContentPart::text("describe"),
            ContentPart::image_base64("QUJD", Some("image/png".into())),
        ]);
        let v = wire_message(&m);
        assert_eq!(v["content"][0]["type"], json!("text"));
        assert_eq!(
            v["content"][1]["image_url"]["url"],
            json!("data:image/png;base64,QUJD")
        );
    }

    #[test]
    fn wire_message_encodes_file_block() {
        let m = Message::user_with_parts(vec![ContentPart::file("QUJD", None, "doc.pdf")]);
        let v = wire_message(&m);
        assert_eq!(v["content"][0]["file"]["filename"], json!("doc.pdf"));
        assert_eq!(
            v["content"][0]["file"]["file_data"],
            json!("data:application/pdf;base64,QUJD")
        );
    }

    #[test]
    fn extract_text_fails_on_empty_choices() {
        assert!(matches!(
            extract_text(&json!({ "choices": [] })),
            Err(ModelError::EmptyResponse)
        ));
    }

    #[test]
    fn extract_text_returns_content() {
        let payload = json!({ "choices": [{ "message": { "content": "ok" } }] });
        assert_eq!(extract_text(&payload).unwrap().text, "ok");
    }
}
