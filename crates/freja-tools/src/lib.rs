// Copyright (c) 2025-2026 Freja Contributors
//
// SPDX-License-Identifier: MIT
//! Tool abstraction and built-in tools.
//!
//! A [`Tool`] is a named, JSON-schema-described operation the model may
//! call.  Tools never fail the calling agent: every failure mode — bad
//! arguments, network trouble, model errors — is reported through
//! [`ToolOutput::err`] so the transcript keeps flowing.
//!
//! [`builtin_registry`] wires up the standard set: `read_webpage`,
//! `text_summary`, `analyze_image`, `analyze_pdf`, `safe_calculate`
//! and `internet_search`.

pub mod builtin;
pub mod calc;
mod registry;
mod tool;

pub use builtin::{
    builtin_registry, AnalyzeImageTool, AnalyzePdfTool, InternetSearchTool, ReadWebpageTool,
    SafeCalculateTool, TextSummaryTool, TASK_ANALYZE_IMAGE, TASK_ANALYZE_PDF, TASK_READ_WEBPAGE,
    TASK_TEXT_SUMMARY,
};
pub use calc::{evaluate, format_number, CalcError};
pub use registry::{ToolRegistry, ToolSchema};
pub use tool::{Tool, ToolCall, ToolOutput};
