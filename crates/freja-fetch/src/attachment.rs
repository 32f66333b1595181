// Copyright (c) 2025-2026 Freja Contributors
//
// SPDX-License-Identifier: MIT
use std::path::Path;
use std::time::Duration;

use base64::{engine::general_purpose::STANDARD as B64, Engine as _};
use tracing::debug;

use crate::{FetchError, BROWSER_USER_AGENT};

const REMOTE_TIMEOUT: Duration = Duration::from_secs(30);

/// Bytes plus a best-effort mime type.
///
/// `mime_type` is `None` when neither the HTTP response nor the file
/// extension identified one; payload constructors apply their own
/// per-kind defaults in that case.
#[derive(Debug, Clone)]
pub struct Attachment {
    pub bytes: Vec<u8>,
    pub mime_type: Option<String>,
}

impl Attachment {
    /// Standard base64 encoding of the raw bytes (no `data:` prefix).
    pub fn to_base64(&self) -> String {
        B64.encode(&self.bytes)
    }
}

/// A source is remote iff it case-insensitively starts with an HTTP(S)
/// scheme; every other string is treated as a local filesystem path.
pub fn is_remote(source: &str) -> bool {
    let lower = source.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Resolve `source` (URL or local path) into an [`Attachment`].
///
/// Remote sources are fetched with a browser user-agent, a 30-second
/// timeout, and redirects followed; any non-2xx status is an error.
/// Local paths are read fully into memory with the mime type guessed
/// from the extension.
pub async fn load_attachment(source: &str) -> Result<Attachment, FetchError> {
    if is_remote(source) {
        fetch_remote(source).await
    } else {
        load_local(source)
    }
}

async fn fetch_remote(url: &str) -> Result<Attachment, FetchError> {
    debug!(url, "fetching attachment");
    let client = reqwest::Client::builder()
        .timeout(REMOTE_TIMEOUT)
        .user_agent(BROWSER_USER_AGENT)
        .build()?;

    let resp = client.get(url).send().await?;
    let status = resp.status();
    if !status.is_success() {
        return Err(FetchError::Status { url: url.to_string(), status: status.as_u16() });
    }

    // "text/html; charset=utf-8" → "text/html"
    let mime_type = resp
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.split(';').next().unwrap_or(v).trim().to_string())
        .filter(|v| !v.is_empty());

    let bytes = resp.bytes().await?.to_vec();
    Ok(Attachment { bytes, mime_type })
}

fn load_local(path: &str) -> Result<Attachment, FetchError> {
    debug!(path, "reading attachment");
    let bytes = std::fs::read(path)
        .map_err(|e| FetchError::Io { path: path.to_string(), source: e })?;
    Ok(Attachment { bytes, mime_type: guess_mime(path) })
}

/// Guess a mime type from the path extension.  Returns `None` for
/// unknown extensions so callers can apply their own defaults.
pub(crate) fn guess_mime(path: &str) -> Option<String> {
    let ext = Path::new(path)
        .extension()
        .and_then(|e| e.to_str())?
        .to_ascii_lowercase();
    let mime = match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "tif" | "tiff" => "image/tiff",
        "pdf" => "application/pdf",
        "txt" => "text/plain",
        "html" | "htm" => "text/html",
        "json" => "application/json",
        _ => return None,
    };
    Some(mime.to_string())
}

// ─── Unit tests ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn url_prefixes_classify_as_remote_case_insensitively() {
        assert!(is_remote("https://example.com/a.png"));
        assert!(is_remote("http://example.com"));
        assert!(is_remote("HTTPS://EXAMPLE.COM/X.PDF"));
        assert!(!is_remote("/tmp/photo.jpg"));
        assert!(!is_remote("relative/file.pdf"));
        assert!(!is_remote("ftp://example.com/a"));
    }

    #[test]
    fn mime_guessed_from_extension() {
        assert_eq!(guess_mime("a/b/photo.JPG").as_deref(), Some("image/jpeg"));
        assert_eq!(guess_mime("doc.pdf").as_deref(), Some("application/pdf"));
        assert_eq!(guess_mime("pic.png").as_deref(), Some("image/png"));
        assert_eq!(guess_mime("noext").is_none(), true);
        assert_eq!(guess_mime("weird.xyz").is_none(), true);
    }

    #[tokio::test]
    async fn local_file_loads_with_guessed_mime() {
        let mut f = tempfile::Builder::new().suffix(".png").tempfile().unwrap();
        f.write_all(b"not-really-a-png").unwrap();
        let att = load_attachment(f.path().to_str().unwrap()).await.unwrap();
        assert_eq!(att.bytes, b"not-really-a-png");
        assert_eq!(att.mime_type.as_deref(), Some("image/png"));
    }

    #[tokio::test]
    async fn missing_local_file_is_an_io_error() {
        let err = load_attachment("/tmp/freja_no_such_file_xyz.pdf")
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Io { .. }));
    }

    #[test]
    fn to_base64_round_trips() {
        let att = Attachment { bytes: b"ABC".to_vec(), mime_type: None };
        assert_eq!(att.to_base64(), "QUJD");
    }
}
