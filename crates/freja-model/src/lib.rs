// Copyright (c) 2025-2026 Freja Contributors
//
// SPDX-License-Identifier: MIT
//! Task-scoped model resolution and chat-model handles.
//!
//! The call path is always the same:
//!
//! ```text
//! resolve(config, task, overrides) → ResolvedConfig → build() → Box<dyn ChatModel>
//! ```
//!
//! [`model_for`] bundles the two steps for the common case.  The returned
//! handle is ready to invoke: credentials have been resolved from the
//! environment and the retry budget is wired into the driver.

mod error;
mod factory;
mod mock;
mod openai_compat;
mod payload;
mod provider;
pub mod registry;
mod resolver;
mod types;

pub use error::ModelError;
pub use factory::build;
pub use mock::{MockModel, ScriptedMockModel};
pub use payload::PayloadBuilder;
pub use provider::{ChatModel, ChatRequest, ChatResponse, ResponseSchema};
pub use resolver::{resolve, ResolvedConfig, TaskOverrides};
pub use types::{ContentPart, Message, Role};

use freja_config::LlmConfig;

/// Resolve `task_id` against `config` and build a ready-to-invoke handle.
///
/// The original entry point of the kit: one call from task id to model.
pub fn model_for(
    config: &LlmConfig,
    task_id: &str,
    overrides: &TaskOverrides,
) -> Result<Box<dyn ChatModel>, ModelError> {
    let resolved = resolve(config, task_id, overrides)?;
    build(&resolved)
}
