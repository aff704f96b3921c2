//! HTML Export Generation
//!
//! Wraps the preview's HTML fragment in a standalone document with an
//! inlined stylesheet. Headings, links and code reuse the editor's
//! highlight colours so an exported article looks like the preview.

use crate::markdown::highlight::{StyleKind, STYLES};
use crate::markdown::{escape_html, render};
use egui::Color32;
use log::info;
use std::path::Path;

// ─────────────────────────────────────────────────────────────────────────────
// Error Types
// ─────────────────────────────────────────────────────────────────────────────

/// Errors that can occur during HTML export.
#[derive(Debug)]
pub enum HtmlExportError {
    /// Failed to write the output file
    IoError(std::io::Error),
}

impl std::fmt::Display for HtmlExportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HtmlExportError::IoError(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for HtmlExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HtmlExportError::IoError(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for HtmlExportError {
    fn from(err: std::io::Error) -> Self {
        HtmlExportError::IoError(err)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// HTML Generation
// ─────────────────────────────────────────────────────────────────────────────

/// Generate a complete HTML document from markdown content.
pub fn generate_html_document(markdown: &str, title: Option<&str>) -> String {
    let body = render(markdown);
    let doc_title = title.unwrap_or("Plant Article");

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <meta name="generator" content="Plantbook">
    <title>{title}</title>
    <style>
{base_css}
{accent_css}
    </style>
</head>
<body>
    <article class="plant-article">
{body}
    </article>
</body>
</html>"#,
        title = escape_html(doc_title),
        base_css = BASE_CSS,
        accent_css = accent_css(),
        body = body,
    )
}

/// Render `markdown` and write it as a standalone document to `output_path`.
pub fn export_to_html_file(
    markdown: &str,
    title: Option<&str>,
    output_path: &Path,
) -> Result<(), HtmlExportError> {
    let html = generate_html_document(markdown, title);
    std::fs::write(output_path, html)?;
    info!("Exported HTML to {}", output_path.display());
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// CSS Generation
// ─────────────────────────────────────────────────────────────────────────────

/// Base CSS for rendered articles (layout, typography).
const BASE_CSS: &str = r#"
body {
    margin: 0;
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', 'Noto Sans', Helvetica, Arial, sans-serif;
    font-size: 16px;
    line-height: 1.6;
    color: #1f2328;
    background-color: #ffffff;
}

.plant-article {
    max-width: 860px;
    margin: 0 auto;
    padding: 32px 24px;
}

.plant-article h1,
.plant-article h2,
.plant-article h3,
.plant-article h4,
.plant-article h5,
.plant-article h6 {
    margin: 16px 0 8px 0;
    line-height: 1.25;
}

.plant-article ul,
.plant-article ol {
    margin: 0;
    padding-left: 2em;
}

.plant-article blockquote {
    margin: 0;
    padding: 0 1em;
    border-left: 4px solid #d0d7de;
    color: #59636e;
}

.plant-article code {
    font-family: 'JetBrains Mono', 'Consolas', 'Monaco', monospace;
    font-size: 0.9em;
    padding: 0.2em 0.4em;
    border-radius: 4px;
    background-color: #f6f8fa;
}

.plant-article pre {
    padding: 16px;
    overflow: auto;
    border-radius: 6px;
    background-color: #f6f8fa;
}

.plant-article pre code {
    padding: 0;
}

.plant-article table {
    border-collapse: collapse;
    margin: 8px 0;
}

.plant-article td {
    padding: 6px 12px;
    border: 1px solid #d0d7de;
}

.plant-article tr:nth-child(even) td {
    background-color: rgba(128, 128, 128, 0.05);
}

.plant-article img {
    max-width: 100%;
    height: auto;
}
"#;

/// Colours and weights shared with the editor's highlight styles.
fn accent_css() -> String {
    format!(
        ".plant-article h1, .plant-article h2, .plant-article h3, \
         .plant-article h4, .plant-article h5, .plant-article h6 {{ {heading} }}\n\
         .plant-article b {{ {bold} }}\n\
         .plant-article i {{ {italic} }}\n\
         .plant-article a {{ {link} }}\n\
         .plant-article code {{ {code} }}\n",
        heading = style_css(StyleKind::Header),
        bold = style_css(StyleKind::Bold),
        italic = style_css(StyleKind::Italic),
        link = style_css(StyleKind::Link),
        code = style_css(StyleKind::Code),
    )
}

/// CSS declarations for one highlight style.
fn style_css(kind: StyleKind) -> String {
    let style = STYLES.get(kind);
    let mut css = format!("color: {};", color32_to_css(style.color));
    if style.bold {
        css.push_str(" font-weight: bold;");
    }
    if style.italic {
        css.push_str(" font-style: italic;");
    }
    if style.underline {
        css.push_str(" text-decoration: underline;");
    }
    css
}

/// Convert Color32 to CSS color string.
fn color32_to_css(color: Color32) -> String {
    format!("rgb({}, {}, {})", color.r(), color.g(), color.b())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
