//! File operations module for Plantbook
//!
//! Native open/save dialogs and the project directory listing.

pub mod dialogs;
pub mod project;

pub use project::{list_markdown_files, list_templates, ProjectFile};
