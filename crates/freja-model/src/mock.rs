// Copyright (c) 2025-2026 Freja Contributors
//
// SPDX-License-Identifier: MIT
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::{ChatRequest, ChatResponse, ModelError, Role};

/// Deterministic mock model for tests.  Echoes the last user message back
/// as the response.
#[derive(Default)]
pub struct MockModel;

#[async_trait]
impl crate::ChatModel for MockModel {
    fn provider(&self) -> &str {
        "mock"
    }
    fn model_name(&self) -> &str {
        "mock-model"
    }

    async fn invoke(&self, req: ChatRequest) -> Result<ChatResponse, ModelError> {
        let reply = req
            .messages
            .iter()
            .rev()
            .find(|m| m.role == Role::User)
            .and_then(|m| m.as_text())
            .unwrap_or("[no input]")
            .to_string();
        Ok(ChatResponse { text: format!("MOCK: {reply}") })
    }
}

/// A pre-scripted mock model.  Each `invoke` pops the next canned reply
/// from the front of the queue and records the request it was given, so
/// tests can assert on exactly what was sent without network access.
pub struct ScriptedMockModel {
    replies: Mutex<VecDeque<String>>,
    /// The last [`ChatRequest`] seen by this model.
    pub last_request: Arc<Mutex<Option<ChatRequest>>>,
}

impl ScriptedMockModel {
    pub fn new(replies: Vec<String>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            last_request: Arc::new(Mutex::new(None)),
        }
    }
}

#[async_trait]
impl crate::ChatModel for ScriptedMockModel {
    fn provider(&self) -> &str {
        "mock"
    }
    fn model_name(&self) -> &str {
        "scripted-mock"
    }

    async fn invoke(&self, req: ChatRequest) -> Result<ChatResponse, ModelError> {
        *self.last_request.lock().unwrap() = Some(req);
        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .ok_or(ModelError::EmptyResponse)?;
        Ok(ChatResponse { text: reply })
    }
}

// ─── Unit tests ──────────────────────────────────────────────────────────────
