// Copyright (c) 2025-2026 Freja Contributors
//
// SPDX-License-Identifier: MIT
//! Freja — task-scoped LLM model resolution and multimodal tool invocation.
//!
//! The crates compose in one direction:
//!
//! ```text
//! freja-config → freja-model → freja-tools / freja-tasks → freja (agent)
//!                freja-fetch ↗
//! ```
//!
//! This crate re-exports the member crates and adds the [`Agent`]: a
//! central model resolved from the `agent-core` task plus the built-in
//! tool registry, ready for an embedding application to drive.

mod agent;

pub use agent::{Agent, AgentBuilder, TASK_AGENT_CORE};

pub use freja_config as config;
pub use freja_fetch as fetch;
pub use freja_model as model;
pub use freja_tasks as tasks;
pub use freja_tools as tools;
