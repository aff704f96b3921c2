//! Markdown rendering, highlighting and editing helpers
//!
//! Everything here works on plain strings. The renderer turns a whole
//! document into an HTML fragment, the highlighter styles the raw editor one
//! line at a time, and the formatting module implements the toolbar's
//! text-insertion actions.
//!
//! # Example
//! ```ignore
//! use crate::markdown::{render, apply_format, FormatCommand};
//!
//! let html = render("# Fern\n- shade");
//! let result = apply_format("Hello world", (0, 5), FormatCommand::Bold);
//! assert_eq!(result.text, "**Hello** world");
//! ```

pub mod formatting;
pub mod highlight;
mod render;
mod template;

pub use formatting::{apply_format, image_markup, insert_literal, FormatCommand, FormatResult};
pub use highlight::layout_job;
pub use render::{escape_html, render};
pub use template::PLANT_TEMPLATE;
