// Copyright (c) 2025-2026 Freja Contributors
//
// SPDX-License-Identifier: MIT
use freja_fetch::FetchError;
use freja_model::ModelError;

/// Failures from the task layer.
///
/// Unlike tools, tasks are library functions: every failure propagates to
/// the caller instead of being flattened into an error string.
#[derive(Debug, thiserror::Error)]
pub enum TaskError {
    #[error("content acquisition failed: {0}")]
    Fetch(#[from] FetchError),

    /// Model resolution, invocation, or structured-output decode failure.
    #[error(transparent)]
    Model(#[from] ModelError),
}
