// Copyright (c) 2025-2026 Freja Contributors
//
// SPDX-License-Identifier: MIT
//! Webpage text acquisition with a two-step fallback chain.
//!
//! 1. Direct GET with browser headers.  Success requires a 2xx status
//!    *and* a non-blank body within the truncation window — truncation
//!    happens before the blank check, so a page whose first `max_chars`
//!    characters are all whitespace counts as a failure.
//! 2. On any direct failure, the URL is re-issued through the public Jina
//!    reader proxy.  A blank proxy body is still returned as success
//!    tagged [`FetchSource::Jina`]: the proxy is the last resort and its
//!    answer is final.
//!
//! Neither step is retried, and transient errors are not distinguished
//! from permanent ones.

use std::time::Duration;

use tracing::debug;

use crate::{FetchError, BROWSER_USER_AGENT};

const PAGE_TIMEOUT: Duration = Duration::from_secs(20);

/// Which step of the fallback chain produced the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchSource {
    Direct,
    Jina,
    Error,
}

impl std::fmt::Display for FetchSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchSource::Direct => write!(f, "direct"),
            FetchSource::Jina => write!(f, "jina"),
            FetchSource::Error => write!(f, "error"),
        }
    }
}

/// Rewrite any http/https URL into the Jina reader proxy endpoint.
pub fn jina_reader_url(url: &str) -> String {
    let stripped = url.split_once("://").map(|(_, rest)| rest).unwrap_or(url);
    format!("https://r.jina.ai/http://{stripped}")
}

/// Fetch page text, truncated to `max_chars` characters.
///
/// Returns `("", FetchSource::Error)` when both steps fail; callers must
/// treat that as a terminal "could not fetch" signal, not something to
/// retry.
pub async fn fetch_webpage(url: &str, max_chars: usize) -> (String, FetchSource) {
    match fetch_webpage_direct(url, max_chars).await {
        Ok(text) => return (text, FetchSource::Direct),
        Err(e) => debug!(url, error = %e, "direct fetch failed, trying reader proxy"),
    }

    match fetch_proxy(url, max_chars).await {
        Ok(text) => (text, FetchSource::Jina),
        Err(e) => {
            debug!(url, error = %e, "reader proxy fetch failed");
            (String::new(), FetchSource::Error)
        }
    }
}

/// The direct step alone: browser-headed GET, no proxy fallback.
///
/// For callers that must know *why* a page could not be read rather
/// than receive a best-effort empty string.
pub async fn fetch_webpage_direct(url: &str, max_chars: usize) -> Result<String, FetchError> {
    let client = reqwest::Client::builder()
        .timeout(PAGE_TIMEOUT)
        .user_agent(BROWSER_USER_AGENT)
        .build()?;

    let resp = client
        .get(url)
        .header(
            "Accept",
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8",
        )
        .header("Accept-Language", "en-US,en;q=0.9")
        .send()
        .await?;

    let status = resp.status();
    if !status.is_success() {
        return Err(FetchError::Status { url: url.to_string(), status: status.as_u16() });
    }

    // Truncate before the blank check: a window of pure whitespace is
    // a failure even if useful content exists beyond it.
    let text = truncate_chars(&resp.text().await?, max_chars);
    if text.trim().is_empty() {
        return Err(FetchError::BlankBody { url: url.to_string() });
    }
    Ok(text)
}

async fn fetch_proxy(url: &str, max_chars: usize) -> Result<String, FetchError> {
    let proxy_url = jina_reader_url(url);
    let client = reqwest::Client::builder().timeout(PAGE_TIMEOUT).build()?;

    let resp = client.get(&proxy_url).send().await?;
    let status = resp.status();
    if !status.is_success() {
        return Err(FetchError::Status { url: proxy_url, status: status.as_u16() });
    }

    // No blank check here: the proxy's (possibly blank) answer is final.
    Ok(truncate_chars(&resp.text().await?, max_chars))
}

/// Truncate to at most `max_chars` characters, respecting UTF-8
/// boundaries.
fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}

// ─── Unit tests ──────────────────────────────────────────────────────────────
