//! Article Export Module for Plantbook
//!
//! - **HTML File**: standalone document with an inlined stylesheet
//! - **Clipboard HTML**: the rendered fragment, for pasting into other apps

pub mod clipboard;
pub mod html;

pub use clipboard::copy_html_to_clipboard;
pub use html::export_to_html_file;
