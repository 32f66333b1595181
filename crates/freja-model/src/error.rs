// Copyright (c) 2025-2026 Freja Contributors
//
// SPDX-License-Identifier: MIT
use freja_config::ConfigError;

/// Failures produced by the resolver, factory, and drivers.
///
/// Configuration variants are fatal and never retried; transient provider
/// failures are retried inside the driver up to the configured budget and
/// surface here only once that budget is exhausted.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("no provider configured for model '{0}'")]
    NoProvider(String),

    #[error("unknown model provider: {0}")]
    UnknownProvider(String),

    #[error("missing API key for provider '{provider}' (set {env})")]
    MissingApiKey { provider: String, env: String },

    #[error("provider request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("provider returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("provider returned an empty completion")]
    EmptyResponse,

    #[error("response did not match the declared schema: {0}")]
    Schema(#[from] serde_json::Error),
}

impl From<ConfigError> for ModelError {
    fn from(e: ConfigError) -> Self {
        ModelError::Configuration(e.to_string())
    }
}
