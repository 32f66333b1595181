// Copyright (c) 2025-2026 Freja Contributors
//
// SPDX-License-Identifier: MIT
use serde::{Deserialize, Serialize};
use serde_json::json;

use freja_config::LlmConfig;
use freja_fetch::load_attachment;
use freja_model::{
    ChatModel, ChatRequest, ContentPart, PayloadBuilder, ResponseSchema, TaskOverrides,
};

use crate::TaskError;

/// Canonical task id for [`analyze_image`].
pub const TASK_ANALYZE_IMAGE: &str = "analyze-image";
/// Canonical task id for [`analyze_image_url`].
pub const TASK_ANALYZE_IMAGE_URL: &str = "analyze-image-url";

const SYSTEM_PROMPT: &str =
    "You are an expert vision analyst. Respond with JSON matching the requested schema.";

const USER_PROMPT: &str = "Describe the image and list the key objects visible in it.";

/// Structured description of an image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageAnalysis {
    pub description: String,
    pub key_objects: Vec<String>,
}

fn response_schema() -> ResponseSchema {
    ResponseSchema::new(
        "image_analysis",
        json!({
            "type": "object",
            "properties": {
                "description": {
                    "type": "string",
                    "description": "A natural-language description of the image"
                },
                "key_objects": {
                    "type": "array",
                    "items": { "type": "string" },
                    "description": "The main objects visible in the image"
                }
            },
            "required": ["description", "key_objects"],
            "additionalProperties": false
        }),
    )
}

/// Load the image (URL or local path), embed it as base64, and produce a
/// structured analysis.
pub async fn analyze_image(
    config: &LlmConfig,
    source: &str,
    task: Option<&str>,
) -> Result<ImageAnalysis, TaskError> {
    let attachment = load_attachment(source).await?;
    let task = task.unwrap_or(TASK_ANALYZE_IMAGE);
    tracing::debug!(task, source, bytes = attachment.bytes.len(), "analyze_image");
    let model = freja_model::model_for(config, task, &TaskOverrides::default())?;
    analyze_image_part(
        model.as_ref(),
        ContentPart::image_base64(attachment.to_base64(), attachment.mime_type.clone()),
    )
    .await
}

/// Analyze an image by URL reference: the URL goes on the wire as-is and
/// the provider downloads it, nothing is fetched locally.
pub async fn analyze_image_url(
    config: &LlmConfig,
    url: &str,
    task: Option<&str>,
) -> Result<ImageAnalysis, TaskError> {
    let task = task.unwrap_or(TASK_ANALYZE_IMAGE_URL);
    let model = freja_model::model_for(config, task, &TaskOverrides::default())?;
    analyze_image_part(model.as_ref(), ContentPart::image_url(url)).await
}

async fn analyze_image_part(
    model: &dyn ChatModel,
    image: ContentPart,
) -> Result<ImageAnalysis, TaskError> {
    let messages = PayloadBuilder::new(SYSTEM_PROMPT)
        .text(USER_PROMPT)
        .attach(image)
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
    use freja_model::ScriptedMockModel;

    #[tokio::test]
    async fn decodes_structured_reply() {
        let model = ScriptedMockModel::new(vec![
            r#"{"description": "a red bicycle", "key_objects": ["bicycle"]}"#.into(),
        ]);
        let out = analyze_image_part(&model, ContentPart::image_url("https://x/a.png"))
            .await
            .unwrap();
        assert_eq!(out.description, "a red bicycle");
        assert_eq!(out.key_objects, vec!["bicycle"]);
    }

    #[tokio::test]
    async fn payload_carries_the_image_part() {
        let model = ScriptedMockModel::new(vec![
            r#"{"description": "d", "key_objects": []}"#.into(),
        ]);
        analyze_image_part(&model, ContentPart::image_base64("QUJD", None))
            .await
            .unwrap();

        let captured = model.last_request.lock().unwrap();
        let user = &captured.as_ref().unwrap().messages[1];
        assert_eq!(user.content.len(), 2);
        assert!(matches!(user.content[1], ContentPart::ImageBase64 { .. }));
    }

    #[tokio::test]
    async fn missing_local_file_propagates_fetch_error() {
        let config: LlmConfig = serde_yaml::from_str(
            r#"
tasks:
  default: { model_name: m }
available_models:
  m: { provider: mock }
"#,
        )
        .unwrap();
        let err = analyze_image(&config, "/tmp/freja_no_such_image.png", None)
            .await
            .unwrap_err();
        assert!(matches!(err, TaskError::Fetch(_)));
    }
}
