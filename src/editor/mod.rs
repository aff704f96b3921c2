//! Editor module for Plantbook
//!
//! This module contains the highlighted text editor for the raw Markdown
//! of the open article.

mod widget;

pub use widget::EditorWidget;
