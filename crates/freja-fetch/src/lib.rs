// Copyright (c) 2025-2026 Freja Contributors
//
// SPDX-License-Identifier: MIT
//! Network and filesystem content acquisition for freja tools and tasks.
//!
//! Two entry points:
//! - [`load_attachment`] — resolve a URL-or-path source into bytes plus a
//!   best-effort mime type, for embedding into multimodal payloads.
//! - [`fetch_webpage`] — fetch page text with a two-step direct →
//!   reader-proxy fallback chain.
//!
//! All requests carry bounded timeouts; nothing here retries.  Retry
//! policy lives with the model-invocation layer, not the fetch layer.

mod attachment;
mod error;
mod webpage;

pub use attachment::{is_remote, load_attachment, Attachment};
pub use error::FetchError;
pub use webpage::{fetch_webpage, fetch_webpage_direct, jina_reader_url, FetchSource};

/// A realistic browser user-agent.  Several sites reject obvious
/// programmatic clients with 403; presenting as a browser keeps the
/// direct fetch path useful.
pub(crate) const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";
