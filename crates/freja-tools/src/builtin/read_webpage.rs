// Copyright (c) 2025-2026 Freja Contributors
//
// SPDX-License-Identifier: MIT
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::debug;

use freja_config::LlmConfig;
use freja_fetch::{fetch_webpage, FetchSource};
use freja_model::PayloadBuilder;

use crate::builtin::{complete, TASK_READ_WEBPAGE};
use crate::tool::{Tool, ToolCall, ToolOutput};

const DEFAULT_MAX_CHARS: usize = 12_000;

const SYSTEM_PROMPT: &str =
    "You are an expert web assistant. Follow the user's instruction precisely.";

/// Fetch a webpage and answer an instruction against its text.
pub struct ReadWebpageTool {
    config: Arc<LlmConfig>,
}

impl ReadWebpageTool {
    pub fn new(config: Arc<LlmConfig>) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Tool for ReadWebpageTool {
    fn name(&self) -> &str {
        "read_webpage"
    }

    fn description(&self) -> &str {
        "Fetch a webpage and process its text content according to an instruction \
         (summarize, extract facts, answer a question). Falls back to a reader proxy \
         when the page blocks direct access."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "url": {
                    "type": "string",
                    "description": "The URL to fetch (http or https)"
                },
                "instruction": {
                    "type": "string",
                    "description": "What to do with the page content"
                },
                "max_chars": {
                    "type": "integer",
                    "description": "Maximum page characters to read (default 12000)"
                }
            },
            "required": ["url", "instruction"],
            "additionalProperties": false
        })
    }

    async fn execute(&self, call: &ToolCall) -> ToolOutput {
        let url = match call.args.get("url").and_then(|v| v.as_str()) {
            Some(u) => u.to_string(),
            None => return ToolOutput::err(&call.id, "missing 'url'"),
        };
        let instruction = match call.args.get("instruction").and_then(|v| v.as_str()) {
            Some(i) => i.to_string(),
            None => return ToolOutput::err(&call.id, "missing 'instruction'"),
        };
        let max_chars = call
            .args
            .get("max_chars")
            .and_then(|v| v.as_u64())
            .unwrap_or(DEFAULT_MAX_CHARS as u64) as usize;

        debug!(url = %url, max_chars, "read_webpage tool");

        let (text, source) = fetch_webpage(&url, max_chars).await;
        if fetch_failed(&text, source) {
            return ToolOutput::err(&call.id, format!("failed to fetch webpage: {url}"));
        }

        let prompt = format!(
            "Instruction:\n{instruction}\n\n\
             Webpage (fetched via {source}): {url}\n\n\
             Content:\n{text}"
        );
        let messages = PayloadBuilder::new(SYSTEM_PROMPT).text(prompt).build();

        match complete(&self.config, TASK_READ_WEBPAGE, messages).await {
            Ok(answer) => ToolOutput::ok(&call.id, answer),
            Err(e) => ToolOutput::err(&call.id, format!("model error: {e}")),
        }
    }
}

/// Terminal fetch failure: the chain gave up, or it "succeeded" with an
/// empty body (the proxy may return 2xx with nothing in it).  An empty
/// page must never reach the model as content.
fn fetch_failed(text: &str, source: FetchSource) -> bool {
    source == FetchSource::Error || text.is_empty()
}
