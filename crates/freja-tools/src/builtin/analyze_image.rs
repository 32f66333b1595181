// Copyright (c) 2025-2026 Freja Contributors
//
// SPDX-License-Identifier: MIT
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::debug;

use freja_config::LlmConfig;
use freja_fetch::load_attachment;
use freja_model::{ContentPart, PayloadBuilder};

use crate::builtin::{complete, TASK_ANALYZE_IMAGE};
use crate::tool::{Tool, ToolCall, ToolOutput};

const SYSTEM_PROMPT: &str =
    "You are an expert vision assistant. Follow the user's instruction precisely.";

/// Analyze an image from a URL or a local path with a vision model.
pub struct AnalyzeImageTool {
    config: Arc<LlmConfig>,
}

impl AnalyzeImageTool {
    pub fn new(config: Arc<LlmConfig>) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Tool for AnalyzeImageTool {
    fn name(&self) -> &str {
        "analyze_image"
    }

    fn description(&self) -> &str {
        "Analyze an image according to an instruction (describe, identify objects, \
         read text). Accepts an http(s) URL or a local file path."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "source": {
                    "type": "string",
                    "description": "Image URL or local file path"
                },
                "instruction": {
                    "type": "string",
                    "description": "What to look for in the image"
                }
            },
            "required": ["source", "instruction"],
            "additionalProperties": false
        })
    }

    async fn execute(&self, call: &ToolCall) -> ToolOutput {
        let source = match call.args.get("source").and_then(|v| v.as_str()) {
            Some(s) => s.to_string(),
            None => return ToolOutput::err(&call.id, "missing 'source'"),
        };
        let instruction = match call.args.get("instruction").and_then(|v| v.as_str()) {
            Some(i) => i.to_string(),
            None => return ToolOutput::err(&call.id, "missing 'instruction'"),
        };

        debug!(source = %source, "analyze_image tool");

        let attachment = match load_attachment(&source).await {
            Ok(a) => a,
            Err(e) => return ToolOutput::err(&call.id, format!("failed to load image: {e}")),
        };

        let messages = PayloadBuilder::new(SYSTEM_PROMPT)
            .text(instruction)
            .attach(ContentPart::image_base64(
                attachment.to_base64(),
                attachment.mime_type.clone(),
            ))
            .build();

        match complete(&self.config, TASK_ANALYZE_IMAGE, messages).await {
            Ok(answer) => ToolOutput::ok(&call.id, answer),
            Err(e) => ToolOutput::err(&call.id, format!("model error: {e}")),
        }
    }
}
