// Copyright (c) 2025-2026 Freja Contributors
//
// SPDX-License-Identifier: MIT
//! Built-in tools.
//!
//! The LLM-backed tools (webpage, summary, image, pdf) each resolve their
//! own model through a dedicated task id, so operators can route e.g.
//! image analysis to a vision-capable model while summaries stay on a
//! cheap one.  `safe_calculate` and `internet_search` never touch a
//! model.

mod analyze_image;
mod analyze_pdf;
mod internet_search;
mod read_webpage;
mod safe_calculate;
mod text_summary;

pub use analyze_image::AnalyzeImageTool;
pub use analyze_pdf::AnalyzePdfTool;
pub use internet_search::InternetSearchTool;
pub use read_webpage::ReadWebpageTool;
pub use safe_calculate::SafeCalculateTool;
pub use text_summary::TextSummaryTool;

use std::sync::Arc;

use freja_config::LlmConfig;
use freja_model::{ChatRequest, Message, ModelError, TaskOverrides};

use crate::ToolRegistry;

/// Task ids the LLM-backed builtins resolve their models through.
pub const TASK_READ_WEBPAGE: &str = "tool-read-webpage";
pub const TASK_TEXT_SUMMARY: &str = "tool-text-summary";
pub const TASK_ANALYZE_IMAGE: &str = "tool-analyze-image";
pub const TASK_ANALYZE_PDF: &str = "tool-analyze-pdf";

/// A registry pre-loaded with every built-in tool.
pub fn builtin_registry(config: Arc<LlmConfig>) -> ToolRegistry {
    let mut reg = ToolRegistry::new();
    reg.register(ReadWebpageTool::new(config.clone()));
    reg.register(TextSummaryTool::new(config.clone()));
    reg.register(AnalyzeImageTool::new(config.clone()));
    reg.register(AnalyzePdfTool::new(config));
    reg.register(SafeCalculateTool);
    reg.register(InternetSearchTool::default());
    reg
}

/// Resolve the model for `task_id` and run a single completion.
pub(crate) async fn complete(
    config: &LlmConfig,
    task_id: &str,
    messages: Vec<Message>,
) -> Result<String, ModelError> {
    let model = freja_model::model_for(config, task_id, &TaskOverrides::default())?;
    let resp = model.invoke(ChatRequest::new(messages)).await?;
    Ok(resp.text)
}

// ─── Unit tests ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn mock_config() -> Arc<LlmConfig> {
        let yaml = r#"
max_retries: 1
tasks:
  default: { model_name: fake }
available_models:
  fake: { provider: mock }
"#;
        Arc::new(serde_yaml::from_str(yaml).unwrap())
    }

    #[test]
    fn registry_contains_all_builtins() {
        let reg = builtin_registry(mock_config());
        assert_eq!(
            reg.names(),
            vec![
                "analyze_image",
                "analyze_pdf",
                "internet_search",
                "read_webpage",
                "safe_calculate",
                "text_summary",
            ]
        );
    }

    #[tokio::test]
    async fn complete_resolves_through_default_task() {
        let config = mock_config();
        let messages = vec![Message::system("sys"), Message::user("hello")];
        let out = complete(&config, TASK_TEXT_SUMMARY, messages).await.unwrap();
        assert_eq!(out, "MOCK: hello");
    }
}
