// Copyright (c) 2025-2026 Freja Contributors
//
// SPDX-License-Identifier: MIT
use std::sync::Arc;

use freja_config::LlmConfig;
use freja_model::{ChatModel, ChatRequest, ModelError, PayloadBuilder, TaskOverrides};
use freja_tools::{builtin_registry, ToolCall, ToolOutput, ToolRegistry, ToolSchema};

/// Task id the agent's central model resolves through.
pub const TASK_AGENT_CORE: &str = "agent-core";

const DEFAULT_SYSTEM_PROMPT: &str =
    "You are a capable AI assistant. Use the available tools when they help \
     you answer accurately, and answer directly when they do not.";

/// Builder for [`Agent`].
pub struct AgentBuilder {
    config: Arc<LlmConfig>,
    system_prompt: Option<String>,
}

impl AgentBuilder {
    pub fn new(config: Arc<LlmConfig>) -> Self {
        Self { config, system_prompt: None }
    }

    /// Replace the default system prompt.
    pub fn system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    /// Resolve the central model and wire up the built-in tools.
    pub fn build(self) -> Result<Agent, ModelError> {
        let model = freja_model::model_for(&self.config, TASK_AGENT_CORE, &TaskOverrides::default())?;
        let tools = builtin_registry(self.config.clone());
        Ok(Agent {
            model,
            tools,
            system_prompt: self.system_prompt.unwrap_or_else(|| DEFAULT_SYSTEM_PROMPT.to_string()),
        })
    }
}

/// A wired assistant: central model, built-in tools, system prompt.
///
/// Deliberately loop-free.  The pieces are exposed — schemas to advertise,
/// an executor for calls the model makes, a one-shot [`Agent::ask`] — and
/// the conversation loop belongs to the embedding application.
pub struct Agent {
    model: Box<dyn ChatModel>,
    tools: ToolRegistry,
    system_prompt: String,
}

impl Agent {
    pub fn builder(config: Arc<LlmConfig>) -> AgentBuilder {
        AgentBuilder::new(config)
    }

    /// Schemas of every wired tool, for the provider's `tools` field.
    pub fn tool_schemas(&self) -> Vec<ToolSchema> {
        self.tools.schemas()
    }

    /// Execute a tool call the model requested.
    pub async fn execute(&self, call: &ToolCall) -> ToolOutput {
        self.tools.execute(call).await
    }

    /// One-shot question against the central model, no tools involved.
    pub async fn ask(&self, prompt: &str) -> Result<String, ModelError> {
        let messages = PayloadBuilder::new(&self.system_prompt).text(prompt).build();
        let resp = self.model.invoke(ChatRequest::new(messages)).await?;
        Ok(resp.text)
    }

    pub fn model(&self) -> &dyn ChatModel {
        self.model.as_ref()
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }
}

// ─── Unit tests ──────────────────────────────────────────────────────────────
