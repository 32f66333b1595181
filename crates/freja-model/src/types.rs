// Copyright (c) 2025-2026 Freja Contributors
//
// SPDX-License-Identifier: MIT
use serde::{Deserialize, Serialize};

/// Best-effort mime default for image attachments with no detected type.
pub(crate) const DEFAULT_IMAGE_MIME: &str = "image/jpeg";
/// Best-effort mime default for file attachments with no detected type.
pub(crate) const DEFAULT_FILE_MIME: &str = "application/pdf";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

/// A single content part in a multi-part message.
///
/// Inline binary content is carried as base64 with an explicit mime type;
/// remote images may instead be passed as a URL reference for providers
/// that fetch them server-side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    Text {
        text: String,
    },
    ImageBase64 {
        /// Base64-encoded image bytes (no `data:` prefix).
        data: String,
        mime_type: String,
    },
    ImageUrl {
        url: String,
    },
    File {
        /// Base64-encoded file bytes (no `data:` prefix).
        data: String,
        mime_type: String,
        filename: String,
    },
}

impl ContentPart {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// Inline image part.  A `None` mime type falls back to `image/jpeg` —
    /// a best-effort default, not a failure.
    pub fn image_base64(data: impl Into<String>, mime_type: Option<String>) -> Self {
        Self::ImageBase64 {
            data: data.into(),
            mime_type: mime_type
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| DEFAULT_IMAGE_MIME.to_string()),
        }
    }

    pub fn image_url(url: impl Into<String>) -> Self {
        Self::ImageUrl { url: url.into() }
    }

    /// Inline file part.  A `None` mime type falls back to `application/pdf`.
    pub fn file(
        data: impl Into<String>,
        mime_type: Option<String>,
        filename: impl Into<String>,
    ) -> Self {
        Self::File {
            data: data.into(),
            mime_type: mime_type
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| DEFAULT_FILE_MIME.to_string()),
            filename: filename.into(),
        }
    }
}

/// A single message: a role plus an ordered sequence of content parts.
///
/// Messages are built fresh per invocation and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: Vec<ContentPart>,
}

impl Message {
    pub fn system(text: impl Into<String>) -> Self {
        Self { role: Role::System, content: vec![ContentPart::text(text)] }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self { role: Role::User, content: vec![ContentPart::text(text)] }
    }

    pub fn user_with_parts(parts: Vec<ContentPart>) -> Self {
        Self { role: Role::User, content: parts }
    }

    /// The text of this message if it consists of exactly one text part.
    pub fn as_text(&self) -> Option<&str> {
        match self.content.as_slice() {
            [ContentPart::Text { text }] => Some(text),
            _ => None,
        }
    }
}

// ─── Unit tests ──────────────────────────────────────────────────────────────
