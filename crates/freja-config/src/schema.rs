// Copyright (c) 2025-2026 Freja Contributors
//
// SPDX-License-Identifier: MIT
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Name of the task entry every configuration must contain.  Unknown task
/// ids resolve to this entry instead of failing.
pub const DEFAULT_TASK: &str = "default";

fn default_max_retries() -> u32 {
    3
}

/// Validation failures detected when a configuration is loaded.
///
/// These are fatal: a process with a broken model table must not start.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("no '{DEFAULT_TASK}' task entry in configuration")]
    MissingDefaultTask,
    #[error("task '{task}' references model '{model}' which is not in available_models")]
    UnknownModel { task: String, model: String },
}

/// Provider parameters for a single model.
///
/// ```yaml
/// available_models:
///   gpt-4o:
///     provider: openai
///     temperature: 0.2
///   o4-mini:
///     provider: openai
///     reasoning_effort: medium
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelEntry {
    /// Provider identifier.  Run `freja list-providers` for the full list.
    pub provider: String,
    /// Sampling temperature forwarded to the provider, if set.
    pub temperature: Option<f32>,
    /// Optional provider-specific deliberation control.  Some providers
    /// reject the parameter outright, so the factory only forwards it when
    /// it is present and non-empty.
    pub reasoning_effort: Option<String>,
}

/// A logical calling context mapped to a model name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskEntry {
    /// Must reference a key of `available_models`.
    pub model_name: String,
}

/// The complete freja configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Retry budget handed to the underlying provider client for transient
    /// call failures.  Not a fetch-layer retry count.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Task table.  A `default` entry is required.
    #[serde(default)]
    pub tasks: HashMap<String, TaskEntry>,
    /// Model table keyed by model name.
    #[serde(default)]
    pub available_models: HashMap<String, ModelEntry>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        let mut tasks = HashMap::new();
        tasks.insert(
            DEFAULT_TASK.to_string(),
            TaskEntry { model_name: "gpt-4o-mini".into() },
        );
        let mut available_models = HashMap::new();
        available_models.insert(
            "gpt-4o-mini".to_string(),
            ModelEntry {
                provider: "openai".into(),
                temperature: Some(0.2),
                reasoning_effort: None,
            },
        );
        Self { max_retries: default_max_retries(), tasks, available_models }
    }
}

impl LlmConfig {
    /// Check the invariants that must hold before the table is used:
    /// a `default` task exists and every task references a known model.
    ///
    /// Caller-supplied overrides can still introduce unknown model names at
    /// resolve time; the resolver re-checks and fails the same way.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.tasks.contains_key(DEFAULT_TASK) {
            return Err(ConfigError::MissingDefaultTask);
        }
        for (task, entry) in &self.tasks {
            if !self.available_models.contains_key(&entry.model_name) {
                return Err(ConfigError::UnknownModel {
                    task: task.clone(),
                    model: entry.model_name.clone(),
                });
            }
        }
        Ok(())
    }

    /// Task entry for `task_id`, falling back to the `default` entry.
    ///
    /// Never fails on an unknown id; this graceful degradation is part of
    /// the resolver contract.  Panics only if called on an unvalidated
    /// config with no `default` entry.
    pub fn task(&self, task_id: &str) -> &TaskEntry {
        self.tasks
            .get(task_id)
            .or_else(|| self.tasks.get(DEFAULT_TASK))
            .expect("validated config always has a 'default' task")
    }

    /// Look up a model entry by name.
    pub fn model(&self, model_name: &str) -> Option<&ModelEntry> {
        self.available_models.get(model_name)
    }
}

// ─── Unit tests ──────────────────────────────────────────────────────────────
