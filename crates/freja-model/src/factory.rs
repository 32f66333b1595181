// Copyright (c) 2025-2026 Freja Contributors
//
// SPDX-License-Identifier: MIT
use tracing::debug;

use crate::openai_compat::OpenAiCompatModel;
use crate::registry::get_driver;
use crate::{ChatModel, MockModel, ModelError, ResolvedConfig};

/// Construct a boxed [`ChatModel`] from a resolved configuration.
///
/// Provider selection goes through the driver registry; the `mock`
/// provider short-circuits to the echo mock for tests and offline runs.
/// The resolved `reasoning_effort` is forwarded only when present —
/// [`crate::resolve`] has already normalised empty values to `None`, so
/// providers that reject the parameter never see it.
///
/// Credential failures are fatal here and deliberately not caught: a
/// missing key cannot be recovered by retrying.
pub fn build(resolved: &ResolvedConfig) -> Result<Box<dyn ChatModel>, ModelError> {
    if resolved.provider == "mock" {
        return Ok(Box::new(MockModel));
    }

    let meta = get_driver(&resolved.provider)
        .ok_or_else(|| ModelError::UnknownProvider(resolved.provider.clone()))?;

    let api_key = meta
        .default_api_key_env
        .and_then(|env| std::env::var(env).ok());
    if meta.requires_api_key && api_key.is_none() {
        return Err(ModelError::MissingApiKey {
            provider: meta.id.to_string(),
            env: meta
                .default_api_key_env
                .expect("key-requiring drivers always name an env var")
                .to_string(),
        });
    }

    let base_url = meta.default_base_url.ok_or_else(|| {
        ModelError::Configuration(format!("provider '{}' has no endpoint", meta.id))
    })?;

    debug!(
        provider = meta.id,
        model = %resolved.model_name,
        reasoning = resolved.reasoning_effort.is_some(),
        "building model handle"
    );

    Ok(Box::new(OpenAiCompatModel::new(
        meta.id,
        resolved.model_name.clone(),
        api_key,
        base_url,
        resolved.temperature,
        resolved.reasoning_effort.clone(),
        resolved.max_retries,
    )))
}

// ─── Unit tests ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn resolved(provider: &str) -> ResolvedConfig {
        ResolvedConfig {
            model_name: "m".into(),
            provider: provider.into(),
            temperature: Some(0.2),
            reasoning_effort: None,
            max_retries: 3,
        }
    }

    #[test]
    fn mock_provider_builds_echo_mock() {
        let model = build(&resolved("mock")).unwrap();
        assert_eq!(model.provider(), "mock");
        assert_eq!(model.model_name(), "mock-model");
    }

    #[test]
    fn unknown_provider_is_rejected() {
        let err = build(&resolved("no-such-provider")).unwrap_err();
        assert!(matches!(err, ModelError::UnknownProvider(p) if p == "no-such-provider"));
    }

    #[test]
    fn keyless_local_provider_builds_without_credentials() {
        // ollama requires no API key
        let model = build(&resolved("ollama")).unwrap();
        assert_eq!(model.provider(), "ollama");
        assert_eq!(model.model_name(), "m");
    }

    #[test]
    fn missing_api_key_is_fatal() {
        std::env::remove_var("OPENROUTER_API_KEY");
        let err = build(&resolved("openrouter")).unwrap_err();
        match err {
            ModelError::MissingApiKey { provider, env } => {
                assert_eq!(provider, "openrouter");
                assert_eq!(env, "OPENROUTER_API_KEY");
            }
            other => panic!("expected MissingApiKey, got {other:?}"),
        }
    }
}
