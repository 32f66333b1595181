// Copyright (c) 2025-2026 Freja Contributors
//
// SPDX-License-Identifier: MIT
//! Task-style analysis functions with structured outputs.
//!
//! Where tools flatten every failure into an error string for the model
//! transcript, these are ordinary async library functions: typed results,
//! propagated errors.  Each resolves its model through its own task id so
//! operators can route individual analyses to different models.
//!
//! Webpage analysis fetches directly and does not use the reader-proxy
//! fallback; a page that cannot be fetched is a [`TaskError::Fetch`],
//! not an empty analysis.

mod error;
mod image;
mod pdf;
mod text;
mod webpage;

pub use error::TaskError;
pub use image::{
    analyze_image, analyze_image_url, ImageAnalysis, TASK_ANALYZE_IMAGE, TASK_ANALYZE_IMAGE_URL,
};
pub use pdf::{analyze_pdf, PdfAnalysis, TASK_ANALYZE_PDF};
pub use text::{analyze_text, analyze_text_with, TextAnalysis, TASK_ANALYZE_TEXT};
pub use webpage::{analyze_webpage, analyze_webpage_text, WebpageAnalysis, TASK_ANALYZE_WEBPAGE};
