// Copyright (c) 2025-2026 Freja Contributors
//
// SPDX-License-Identifier: MIT
use serde::{Deserialize, Serialize};
use serde_json::json;

use freja_config::LlmConfig;
use freja_fetch::fetch_webpage_direct;
use freja_model::{ChatModel, ChatRequest, PayloadBuilder, ResponseSchema, TaskOverrides};

use crate::TaskError;

/// Canonical task id for [`analyze_webpage`].
pub const TASK_ANALYZE_WEBPAGE: &str = "analyze-webpage";

const SYSTEM_PROMPT: &str =
    "You are an expert web analyst. Respond with JSON matching the requested schema.";

/// Structured description of a webpage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebpageAnalysis {
    pub title: String,
    pub description: String,
    pub key_objects: Vec<String>,
}

fn response_schema() -> ResponseSchema {
    ResponseSchema::new(
        "webpage_analysis",
        json!({
            "type": "object",
            "properties": {
                "title": {
                    "type": "string",
                    "description": "The page title"
                },
                "description": {
                    "type": "string",
                    "description": "A short description of what the page is about"
                },
                "key_objects": {
                    "type": "array",
                    "items": { "type": "string" },
                    "description": "The main entities, products, or topics on the page"
                }
            },
            "required": ["title", "description", "key_objects"],
            "additionalProperties": false
        }),
    )
}

/// Fetch `url` directly (no reader-proxy fallback) and produce a
/// structured analysis of its content.  Fetch failures propagate.
pub async fn analyze_webpage(
    config: &LlmConfig,
    url: &str,
    max_chars: usize,
    task: Option<&str>,
) -> Result<WebpageAnalysis, TaskError> {
    let text = fetch_webpage_direct(url, max_chars).await?;
    let task = task.unwrap_or(TASK_ANALYZE_WEBPAGE);
    tracing::debug!(task, url, chars = text.len(), "analyze_webpage");
    let model = freja_model::model_for(config, task, &TaskOverrides::default())?;
    analyze_webpage_text(model.as_ref(), url, &text).await
}

/// Analysis step alone, for callers that already hold the page text.
pub async fn analyze_webpage_text(
    model: &dyn ChatModel,
    url: &str,
    text: &str,
) -> Result<WebpageAnalysis, TaskError> {
    let messages = PayloadBuilder::new(SYSTEM_PROMPT)
        .text(format!("Analyze this webpage.\n\nURL: {url}\n\nContent:\n{text}"))
        .build();
    let resp = model
        .invoke(ChatRequest::new(messages).with_schema(response_schema()))
        .await?;
    Ok(resp.parse()?)
}

// ─── Unit tests ──────────────────────────────────────────────────────────────
