// Copyright (c) 2025-2026 Freja Contributors
//
// SPDX-License-Identifier: MIT
use serde::{Deserialize, Serialize};
use serde_json::json;

use freja_config::LlmConfig;
use freja_model::{ChatModel, ChatRequest, PayloadBuilder, ResponseSchema, TaskOverrides};

use crate::TaskError;

/// Canonical task id for [`analyze_text`].
pub const TASK_ANALYZE_TEXT: &str = "analyze-text";

const SYSTEM_PROMPT: &str =
    "You are an expert text analyst. Respond with JSON matching the requested schema.";

/// Structured result of a text analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextAnalysis {
    pub analysis: String,
}

fn response_schema() -> ResponseSchema {
    ResponseSchema::new(
        "text_analysis",
        json!({
            "type": "object",
            "properties": {
                "analysis": {
                    "type": "string",
                    "description": "A concise analysis of the text: topic, tone, and key claims"
                }
            },
            "required": ["analysis"],
            "additionalProperties": false
        }),
    )
}

/// Analyze a block of text with the model resolved for `task`
/// (defaults to [`TASK_ANALYZE_TEXT`]).
pub async fn analyze_text(
    config: &LlmConfig,
    text: &str,
    task: Option<&str>,
) -> Result<TextAnalysis, TaskError> {
    let task = task.unwrap_or(TASK_ANALYZE_TEXT);
    tracing::debug!(task, chars = text.len(), "analyze_text");
    let model = freja_model::model_for(config, task, &TaskOverrides::default())?;
    analyze_text_with(model.as_ref(), text).await
}

/// Same as [`analyze_text`] but against an already-built model handle.
pub async fn analyze_text_with(
    model: &dyn ChatModel,
    text: &str,
) -> Result<TextAnalysis, TaskError> {
    let messages = PayloadBuilder::new(SYSTEM_PROMPT)
        .text(format!("Analyze the following text.\n\n{text}"))
        .build();
    let resp = model
        .invoke(ChatRequest::new(messages).with_schema(response_schema()))
        .await?;
    Ok(resp.parse()?)
}

// ─── Unit tests ──────────────────────────────────────────────────────────────
