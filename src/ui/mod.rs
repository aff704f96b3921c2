//! UI components for Plantbook
//!
//! This module contains the toolbar, the project panel, and the About window.

mod about;
mod project_panel;
mod toolbar;

pub use about::AboutPanel;
pub use project_panel::ProjectPanel;
pub use toolbar::{shortcut_action, AppAction, Toolbar};
