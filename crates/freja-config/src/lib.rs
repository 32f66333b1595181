// Copyright (c) 2025-2026 Freja Contributors
//
// SPDX-License-Identifier: MIT
//! Model and task configuration for freja.
//!
//! The configuration is a single YAML document loaded once at process start
//! and never mutated afterwards.  It maps logical *tasks* (calling contexts
//! such as `tool-read-webpage`) to model names, and model names to their
//! provider parameters.  Callers hold it behind an `Arc` and pass it by
//! reference into the resolver; there is no reload API.

mod loader;
mod schema;

pub use loader::load;
pub use schema::{ConfigError, LlmConfig, ModelEntry, TaskEntry, DEFAULT_TASK};
