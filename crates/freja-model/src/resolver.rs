// Copyright (c) 2025-2026 Freja Contributors
//
// SPDX-License-Identifier: MIT
use freja_config::{LlmConfig, DEFAULT_TASK};

use crate::ModelError;

/// Caller-supplied overrides applied on top of a task entry.
///
/// Precedence: explicit override > task entry > global default.
#[derive(Debug, Clone, Default)]
pub struct TaskOverrides {
    pub model_name: Option<String>,
    pub temperature: Option<f32>,
    pub reasoning_effort: Option<String>,
    pub max_retries: Option<u32>,
}

impl TaskOverrides {
    pub fn model_name(mut self, name: impl Into<String>) -> Self {
        self.model_name = Some(name.into());
        self
    }

    pub fn temperature(mut self, t: f32) -> Self {
        self.temperature = Some(t);
        self
    }

    pub fn reasoning_effort(mut self, effort: impl Into<String>) -> Self {
        self.reasoning_effort = Some(effort.into());
        self
    }

    pub fn max_retries(mut self, n: u32) -> Self {
        self.max_retries = Some(n);
        self
    }
}

/// The effective per-call configuration.  Ephemeral: recomputed on every
/// call and never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub model_name: String,
    pub provider: String,
    pub temperature: Option<f32>,
    /// Normalised: `Some` is always non-empty.
    pub reasoning_effort: Option<String>,
    pub max_retries: u32,
}

/// Resolve the effective configuration for `task_id`.
///
/// Unknown task ids fall back to the `default` entry — deliberate graceful
/// degradation, never an error.  A model with no `available_models` entry
/// is a fatal configuration error, surfaced immediately and never retried.
/// Pure function of the config table and its inputs.
pub fn resolve(
    config: &LlmConfig,
    task_id: &str,
    overrides: &TaskOverrides,
) -> Result<ResolvedConfig, ModelError> {
    let model_name = match &overrides.model_name {
        Some(name) => name.clone(),
        None => {
            let task = config
                .tasks
                .get(task_id)
                .or_else(|| config.tasks.get(DEFAULT_TASK))
                .ok_or_else(|| {
                    ModelError::Configuration(format!(
                        "no '{DEFAULT_TASK}' task entry to fall back to for '{task_id}'"
                    ))
                })?;
            task.model_name.clone()
        }
    };

    let entry = config
        .model(&model_name)
        .ok_or_else(|| ModelError::NoProvider(model_name.clone()))?;

    // An empty reasoning effort means "absent": some providers reject the
    // parameter when it carries no value.
    let reasoning_effort = overrides
        .reasoning_effort
        .clone()
        .or_else(|| entry.reasoning_effort.clone())
        .filter(|s| !s.is_empty());

    Ok(ResolvedConfig {
        provider: entry.provider.clone(),
        temperature: overrides.temperature.or(entry.temperature),
        reasoning_effort,
        max_retries: overrides.max_retries.unwrap_or(config.max_retries),
        model_name,
    })
}

// ─── Unit tests ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> LlmConfig {
        serde_yaml::from_str(
            r#"
max_retries: 3
tasks:
  default:
    model_name: gpt-4o
  tool-analyze-image:
    model_name: o4-mini
available_models:
  gpt-4o:
    provider: openai
    temperature: 0.2
  o4-mini:
    provider: openai
    temperature: 1.0
    reasoning_effort: medium
"#,
        )
        .unwrap()
    }

    #[test]
    fn known_task_resolves_its_entry() {
        let r = resolve(&config(), "tool-analyze-image", &TaskOverrides::default()).unwrap();
        assert_eq!(r.model_name, "o4-mini");
        assert_eq!(r.provider, "openai");
        assert_eq!(r.temperature, Some(1.0));
        assert_eq!(r.reasoning_effort.as_deref(), Some("medium"));
        assert_eq!(r.max_retries, 3);
    }

    #[test]
    fn unknown_task_resolves_exactly_like_default() {
        let cfg = config();
        let fallback = resolve(&cfg, "no-such-task", &TaskOverrides::default()).unwrap();
        let default = resolve(&cfg, "default", &TaskOverrides::default()).unwrap();
        assert_eq!(fallback, default);
        assert_eq!(fallback.model_name, "gpt-4o");
    }

    #[test]
    fn override_model_name_wins_over_task_entry() {
        let r = resolve(
            &config(),
            "default",
            &TaskOverrides::default().model_name("o4-mini"),
        )
        .unwrap();
        assert_eq!(r.model_name, "o4-mini");
        assert_eq!(r.reasoning_effort.as_deref(), Some("medium"));
    }

    #[test]
    fn override_temperature_wins_over_model_entry() {
        let r = resolve(
            &config(),
            "default",
            &TaskOverrides::default().temperature(0.9),
        )
        .unwrap();
        assert_eq!(r.temperature, Some(0.9));
    }

    #[test]
    fn override_max_retries_wins_over_global() {
        let r = resolve(
            &config(),
            "default",
            &TaskOverrides::default().max_retries(7),
        )
        .unwrap();
        assert_eq!(r.max_retries, 7);
    }

    #[test]
    fn unregistered_model_is_a_configuration_error() {
        let err = resolve(
            &config(),
            "default",
            &TaskOverrides::default().model_name("not-a-model"),
        )
        .unwrap_err();
        assert!(matches!(err, ModelError::NoProvider(m) if m == "not-a-model"));
    }

    #[test]
    fn empty_reasoning_effort_is_normalised_away() {
        let r = resolve(
            &config(),
            "tool-analyze-image",
            &TaskOverrides::default().reasoning_effort(""),
        )
        .unwrap();
        assert!(r.reasoning_effort.is_none());
    }

    #[test]
    fn resolve_is_idempotent() {
        let cfg = config();
        let ov = TaskOverrides::default().temperature(0.5);
        let a = resolve(&cfg, "tool-analyze-image", &ov).unwrap();
        let b = resolve(&cfg, "tool-analyze-image", &ov).unwrap();
        assert_eq!(a, b);
    }
}
