//! Clipboard Operations for HTML Export
//!
//! Copies the rendered article to the system clipboard using the arboard
//! crate, with the Markdown source as the plain-text fallback.

// Variants mirror the two failure points of arboard
#![allow(clippy::enum_variant_names)]

use crate::markdown::render;
use arboard::Clipboard;

// ─────────────────────────────────────────────────────────────────────────────
// Clipboard Error
// ─────────────────────────────────────────────────────────────────────────────

/// Errors that can occur during clipboard operations.
#[derive(Debug)]
pub enum ClipboardError {
    /// Failed to access clipboard
    AccessError(String),
    /// Failed to set clipboard content
    WriteError(String),
}

impl std::fmt::Display for ClipboardError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClipboardError::AccessError(msg) => write!(f, "Clipboard access error: {}", msg),
            ClipboardError::WriteError(msg) => write!(f, "Clipboard write error: {}", msg),
        }
    }
}

impl std::error::Error for ClipboardError {}

// ─────────────────────────────────────────────────────────────────────────────
// Clipboard Operations
// ─────────────────────────────────────────────────────────────────────────────

/// Render `markdown` and copy the HTML fragment to the clipboard.
///
/// Apps that accept rich paste receive the HTML; everything else gets the
/// Markdown source.
pub fn copy_html_to_clipboard(markdown: &str) -> Result<(), ClipboardError> {
    let html = render(markdown);
    copy_html_with_fallback(&html, markdown)
}

/// Copy HTML with plain text fallback to clipboard.
pub fn copy_html_with_fallback(html: &str, plain_text: &str) -> Result<(), ClipboardError> {
    let mut clipboard = Clipboard::new().map_err(|e| ClipboardError::AccessError(e.to_string()))?;

    clipboard
        .set_html(html, Some(plain_text))
        .map_err(|e| ClipboardError::WriteError(e.to_string()))?;

    Ok(())
}
