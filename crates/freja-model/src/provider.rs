// Copyright (c) 2025-2026 Freja Contributors
//
// SPDX-License-Identifier: MIT
use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::{Message, ModelError};

/// A declared shape for structured output.
///
/// `schema` is a JSON Schema object; providers that support constrained
/// decoding receive it as a `response_format`, and the reply text is
/// expected to be a JSON document matching it.
#[derive(Debug, Clone)]
pub struct ResponseSchema {
    pub name: String,
    pub schema: serde_json::Value,
}

impl ResponseSchema {
    pub fn new(name: impl Into<String>, schema: serde_json::Value) -> Self {
        Self { name: name.into(), schema }
    }
}

/// A single chat invocation: the message payload plus an optional
/// structured-output schema.
#[derive(Debug, Clone)]
pub struct ChatRequest {
    pub messages: Vec<Message>,
    pub schema: Option<ResponseSchema>,
}

impl ChatRequest {
    pub fn new(messages: Vec<Message>) -> Self {
        Self { messages, schema: None }
    }

    pub fn with_schema(mut self, schema: ResponseSchema) -> Self {
        self.schema = Some(schema);
        self
    }
}

/// The reply from one invocation.
#[derive(Debug, Clone)]
pub struct ChatResponse {
    pub text: String,
}

impl ChatResponse {
    /// Decode the reply text as JSON into `T`.
    ///
    /// Tolerates a Markdown code fence around the document, which some
    /// models emit even under a declared schema.
    pub fn parse<T: DeserializeOwned>(&self) -> Result<T, ModelError> {
        let trimmed = strip_code_fence(self.text.trim());
        Ok(serde_json::from_str(trimmed)?)
    }
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    // Skip the optional language tag on the opening fence line.
    let rest = rest.split_once('\n').map(|(_, body)| body).unwrap_or(rest);
    rest.trim_end().strip_suffix("```").unwrap_or(rest).trim()
}

/// A ready-to-invoke chat-model handle.
///
/// Implementations own their credentials, endpoint, and retry policy;
/// callers only supply messages.  The handle is cheap to construct and is
/// built fresh per call by the factory.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Provider id (e.g. `"openai"`).
    fn provider(&self) -> &str;

    /// Model identifier as reported to users.
    fn model_name(&self) -> &str;

    /// Send one request and return the complete response.
    async fn invoke(&self, req: ChatRequest) -> Result<ChatResponse, ModelError>;
}

impl std::fmt::Debug for dyn ChatModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatModel")
            .field("provider", &self.provider())
            .field("model_name", &self.model_name())
            .finish()
    }
}

// ─── Unit tests ──────────────────────────────────────────────────────────────
