// Copyright (c) 2025-2026 Freja Contributors
//
// SPDX-License-Identifier: MIT
use crate::{ContentPart, Message};

/// Assembles the two-message payload every invocation uses: one system
/// message carrying the persona, one user message whose content is a
/// single text part followed by zero or more attachment parts.
///
/// The builder performs no network or disk I/O; attachment bytes and URLs
/// must already be resolved by the caller.
#[derive(Debug, Clone)]
pub struct PayloadBuilder {
    system: String,
    text: String,
    attachments: Vec<ContentPart>,
}

impl PayloadBuilder {
    /// `system` is the role-specific persona, e.g. "You are an expert
    /// vision assistant. Follow the user's instruction precisely."
    pub fn new(system: impl Into<String>) -> Self {
        Self { system: system.into(), text: String::new(), attachments: Vec::new() }
    }

    /// The user text block: instruction plus any surrounding context
    /// (source URL, fetch method, document text).  Always emitted first.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Append an attachment part after the text block.  Text parts are
    /// rejected here; the text block is set via [`PayloadBuilder::text`].
    pub fn attach(mut self, part: ContentPart) -> Self {
        debug_assert!(
            !matches!(part, ContentPart::Text { .. }),
            "attachments must not be text parts"
        );
        self.attachments.push(part);
        self
    }

    /// Produce exactly `[system, user]`.
    pub fn build(self) -> Vec<Message> {
        let mut parts = Vec::with_capacity(1 + self.attachments.len());
        parts.push(ContentPart::text(self.text));
        parts.extend(self.attachments);
        vec![Message::system(self.system), Message::user_with_parts(parts)]
    }
}

// ─── Unit tests ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Role;

    #[test]
    fn build_emits_exactly_system_then_user() {
        let msgs = PayloadBuilder::new("persona").text("do the thing").build();
        assert_eq!(msgs.len(), 2);
        assert_eq!(msgs[0].role, Role::System);
        assert_eq!(msgs[0].as_text(), Some("persona"));
        assert_eq!(msgs[1].role, Role::User);
        assert_eq!(msgs[1].as_text(), Some("do the thing"));
    }

    #[test]
    fn text_part_precedes_attachments() {
        let msgs = PayloadBuilder::new("persona")
            .text("Instruction:\nlook")
            .attach(ContentPart::image_base64("QUJD", None))
            .attach(ContentPart::image_url("https://example.com/b.png"))
            .build();
        let user = &msgs[1];
        assert_eq!(user.content.len(), 3);
        assert!(matches!(user.content[0], ContentPart::Text { .. }));
        assert!(matches!(user.content[1], ContentPart::ImageBase64 { .. }));
        assert!(matches!(user.content[2], ContentPart::ImageUrl { .. }));
    }

    #[test]
    fn empty_builder_still_yields_a_text_part() {
        let msgs = PayloadBuilder::new("p").build();
        assert_eq!(msgs[1].content.len(), 1);
        assert_eq!(msgs[1].as_text(), Some(""));
    }
}
