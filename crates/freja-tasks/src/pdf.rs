// Copyright (c) 2025-2026 Freja Contributors
//
// SPDX-License-Identifier: MIT
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::json;

use freja_config::LlmConfig;
use freja_fetch::load_attachment;
use freja_model::{
    ChatModel, ChatRequest, ContentPart, PayloadBuilder, ResponseSchema, TaskOverrides,
};

use crate::TaskError;

/// Canonical task id for [`analyze_pdf`].
pub const TASK_ANALYZE_PDF: &str = "analyze-pdf";

const SYSTEM_PROMPT: &str =
    "You are an expert document analyst. Respond with JSON matching the requested schema.";

const USER_PROMPT: &str = "Describe this document and list its key topics.";

/// Structured description of a PDF document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PdfAnalysis {
    pub description: String,
    pub key_objects: Vec<String>,
}

fn response_schema() -> ResponseSchema {
    ResponseSchema::new(
        "pdf_analysis",
        json!({
            "type": "object",
            "properties": {
                "description": {
                    "type": "string",
                    "description": "A natural-language summary of the document"
                },
                "key_objects": {
                    "type": "array",
                    "items": { "type": "string" },
                    "description": "The main topics, figures, or sections in the document"
                }
            },
            "required": ["description", "key_objects"],
            "additionalProperties": false
        }),
    )
}

/// Load the PDF (URL or local path), embed it as base64, and produce a
/// structured analysis.
pub async fn analyze_pdf(
    config: &LlmConfig,
    source: &str,
    task: Option<&str>,
) -> Result<PdfAnalysis, TaskError> {
    let attachment = load_attachment(source).await?;
    let filename = Path::new(source)
        .file_name()
        .and_then(|n| n.to_str())
        .filter(|n| !n.is_empty())
        .unwrap_or("document.pdf")
        .to_string();

    let task = task.unwrap_or(TASK_ANALYZE_PDF);
    tracing::debug!(task, source, bytes = attachment.bytes.len(), "analyze_pdf");
    let model = freja_model::model_for(config, task, &TaskOverrides::default())?;
    analyze_pdf_part(
        model.as_ref(),
        ContentPart::file(attachment.to_base64(), attachment.mime_type.clone(), filename),
    )
    .await
}

async fn analyze_pdf_part(
    model: &dyn ChatModel,
    file: ContentPart,
) -> Result<PdfAnalysis, TaskError> {
    let messages = PayloadBuilder::new(SYSTEM_PROMPT)
        .text(USER_PROMPT)
        .attach(file)
        .build();
    let resp = model
        .invoke(ChatRequest::new(messages).with_schema(response_schema()))
        .await?;
    Ok(resp.parse()?)
}

// ─── Unit tests ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use freja_model::ScriptedMockModel;

    fn mock_config() -> LlmConfig {
        serde_yaml::from_str(
            r#"
tasks:
  default: { model_name: m }
available_models:
  m: { provider: mock }
"#,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn decodes_structured_reply() {
        let model = ScriptedMockModel::new(vec![
            r#"{"description": "quarterly report", "key_objects": ["revenue", "forecast"]}"#
                .into(),
        ]);
        let file = ContentPart::file("QUJD", Some("application/pdf".into()), "q3.pdf");
        let out = analyze_pdf_part(&model, file).await.unwrap();
        assert_eq!(out.description, "quarterly report");
        assert_eq!(out.key_objects.len(), 2);
    }

    #[tokio::test]
    async fn payload_carries_the_file_part() {
        let model = ScriptedMockModel::new(vec![
            r#"{"description": "d", "key_objects": []}"#.into(),
        ]);
        let file = ContentPart::file("QUJD", None, "a.pdf");
        analyze_pdf_part(&model, file).await.unwrap();

        let captured = model.last_request.lock().unwrap();
        let user = &captured.as_ref().unwrap().messages[1];
        assert!(matches!(user.content[1], ContentPart::File { .. }));
    }

    #[tokio::test]
    async fn local_pdf_loads_and_decode_error_propagates() {
        // Mock model echoes free text, which cannot decode into the schema.
        let mut f = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
        f.write_all(b"%PDF-1.4").unwrap();

        let err = analyze_pdf(&mock_config(), f.path().to_str().unwrap(), None)
            .await
            .unwrap_err();
        assert!(matches!(err, TaskError::Model(_)));
    }
}
