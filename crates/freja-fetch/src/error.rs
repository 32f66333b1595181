// Copyright (c) 2025-2026 Freja Contributors
//
// SPDX-License-Identifier: MIT

/// Failures while acquiring remote or local content.
///
/// Propagated, not retried: the webpage fallback chain recovers from
/// these locally, and every other caller surfaces them as-is.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{url} returned status {status}")]
    Status { url: String, status: u16 },

    #[error("reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Successful response whose useful content is blank after truncation.
    #[error("{url} returned a blank body")]
    BlankBody { url: String },
}
