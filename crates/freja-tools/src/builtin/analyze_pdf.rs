// Copyright (c) 2025-2026 Freja Contributors
//
// SPDX-License-Identifier: MIT
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::debug;

use freja_config::LlmConfig;
use freja_fetch::load_attachment;
use freja_model::{ContentPart, PayloadBuilder};

use crate::builtin::{complete, TASK_ANALYZE_PDF};
use crate::tool::{Tool, ToolCall, ToolOutput};

const SYSTEM_PROMPT: &str =
    "You are an expert document analysis assistant. Follow the user's instruction precisely.";

/// Analyze a PDF document from a URL or a local path.
pub struct AnalyzePdfTool {
    config: Arc<LlmConfig>,
}

impl AnalyzePdfTool {
    pub fn new(config: Arc<LlmConfig>) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Tool for AnalyzePdfTool {
    fn name(&self) -> &str {
        "analyze_pdf"
    }

    fn description(&self) -> &str {
        "Analyze a PDF document according to an instruction (summarize, extract \
         figures, answer questions). Accepts an http(s) URL or a local file path."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "source": {
                    "type": "string",
                    "description": "PDF URL or local file path"
                },
                "instruction": {
                    "type": "string",
                    "description": "What to extract from the document"
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

        debug!(source = %source, "analyze_pdf tool");

        let attachment = match load_attachment(&source).await {
            Ok(a) => a,
            Err(e) => return ToolOutput::err(&call.id, format!("failed to load document: {e}")),
        };

        let messages = PayloadBuilder::new(SYSTEM_PROMPT)
            .text(instruction)
            .attach(ContentPart::file(
                attachment.to_base64(),
                attachment.mime_type.clone(),
                document_filename(&source),
            ))
            .build();

        match complete(&self.config, TASK_ANALYZE_PDF, messages).await {
            Ok(answer) => ToolOutput::ok(&call.id, answer),
            Err(e) => ToolOutput::err(&call.id, format!("model error: {e}")),
        }
    }
}

/// Best-effort filename for the wire payload; some providers require one.
fn document_filename(source: &str) -> String {
    // Works for URLs too: the path separator splits out the last segment.
    Path::new(source)
        .file_name()
        .and_then(|n| n.to_str())
        .filter(|n| !n.is_empty())
        .unwrap_or("document.pdf")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn mock_config() -> Arc<LlmConfig> {
        let yaml = r#"
tasks:
  default: { model_name: fake }
available_models:
  fake: { provider: mock }
"#;
        Arc::new(serde_yaml::from_str(yaml).unwrap())
    }

    #[test]
    fn filename_extracted_from_path_and_url() {
        assert_eq!(document_filename("/tmp/report.pdf"), "report.pdf");
        assert_eq!(document_filename("https://example.com/docs/paper.pdf"), "paper.pdf");
        assert_eq!(document_filename(""), "document.pdf");
    }

    #[tokio::test]
    async fn missing_file_is_a_tool_error() {
        let t = AnalyzePdfTool::new(mock_config());
        let call = ToolCall {
            id: "1".into(),
            name: "analyze_pdf".into(),
            args: json!({"source": "/tmp/freja_no_such_doc.pdf", "instruction": "summarize"}),
        };
        let out = t.execute(&call).await;
        assert!(out.is_error);
        assert!(out.content.contains("failed to load document"));
    }

    #[tokio::test]
    async fn local_pdf_reaches_the_model() {
        let mut f = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
        f.write_all(b"%PDF-1.4 fake").unwrap();

        let t = AnalyzePdfTool::new(mock_config());
        let call = ToolCall {
            id: "1".into(),
            name: "analyze_pdf".into(),
            args: json!({
                "source": f.path().to_str().unwrap(),
                "instruction": "list the section headings"
            }),
        };
        let out = t.execute(&call).await;
        assert!(!out.is_error);
        assert!(out.content.contains("list the section headings"));
    }
}
