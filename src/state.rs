//! Application state management for Plantbook
//!
//! This module defines the central `AppState` struct that owns the open
//! document, its rendered preview, the project listing, the settings, and
//! the UI state (toasts, confirmation dialog, About window).

use crate::config::{load_config, save_config_silent, Settings};
use crate::document::Document;
use crate::error::{Error, Result};
use crate::files::{list_markdown_files, list_templates, ProjectFile};
use crate::markdown::{self, image_markup, render, FormatCommand, PLANT_TEMPLATE};
use crate::preview::{parse_fragment, PreviewBlock};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};

/// How long status toasts stay visible, in seconds.
pub const TOAST_DURATION: f64 = 3.0;

// ─────────────────────────────────────────────────────────────────────────────
// UI State
// ─────────────────────────────────────────────────────────────────────────────

/// UI-related state flags.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Whether the about window is open
    pub show_about: bool,
    /// Whether the template picker window is open
    pub show_template_picker: bool,
    /// Whether a confirmation dialog is open (unsaved changes)
    pub show_confirm_dialog: bool,
    /// Message for the confirmation dialog
    pub confirm_dialog_message: String,
    /// Pending action after confirmation
    pub pending_action: Option<PendingAction>,
    /// Temporary toast message (shown in the status bar)
    pub toast_message: Option<String>,
    /// When the toast message should expire (as seconds since app start)
    pub toast_expires_at: Option<f64>,
    /// App time seen by the last `update_toast` call
    pub now: f64,
}

/// Actions that replace the document and need confirmation when it has
/// unsaved changes.
#[derive(Debug, Clone, PartialEq)]
pub enum PendingAction {
    /// Exit the application
    Exit,
    /// Open a file (replacing the current document)
    OpenFile(PathBuf),
    /// Start a new document from a project template
    OpenTemplate(PathBuf),
    /// Reset to the built-in plant template
    NewDocument,
}

// ─────────────────────────────────────────────────────────────────────────────
// Application State
// ─────────────────────────────────────────────────────────────────────────────

/// Central application state struct.
///
/// # Example
///
/// ```ignore
/// let mut state = AppState::new();
/// state.apply_format(FormatCommand::Bold);
/// assert!(state.preview_html.contains("<b>"));
/// ```
#[derive(Debug)]
pub struct AppState {
    /// The open article
    pub document: Document,
    /// User settings (loaded from config)
    pub settings: Settings,
    /// UI-related state
    pub ui: UiState,
    /// Latest rendered HTML fragment
    pub preview_html: String,
    /// The fragment read back into blocks for the preview pane
    pub preview_blocks: Vec<PreviewBlock>,
    /// Number of renders since start-up
    render_count: u64,
    /// Markdown files found under the project directory
    pub project_files: Vec<ProjectFile>,
    /// Templates found under `<project>/templates`
    pub templates: Vec<ProjectFile>,
    /// Whether settings have been modified and need saving
    settings_dirty: bool,
}

impl AppState {
    /// Create a new AppState with settings loaded from config.
    pub fn new() -> Self {
        let settings = load_config();
        info!("AppState initialized with settings");
        Self::with_settings(settings)
    }

    /// Create AppState with custom settings.
    ///
    /// The previous session is restored from `settings.session`.
    pub fn with_settings(settings: Settings) -> Self {
        let mut state = Self {
            document: Document::from_template(),
            settings,
            ui: UiState::default(),
            preview_html: String::new(),
            preview_blocks: Vec::new(),
            render_count: 0,
            project_files: Vec::new(),
            templates: Vec::new(),
            settings_dirty: false,
        };

        state.document = state.restore_session();
        state.refresh_project();
        state.refresh_preview();
        state
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Session
    // ─────────────────────────────────────────────────────────────────────────

    /// Rebuild the document of the previous session.
    ///
    /// A file that can no longer be read falls back to the stored content,
    /// and to the template when there is none.
    fn restore_session(&self) -> Document {
        let session = &self.settings.session;
        if session.is_empty() {
            debug!("No session to restore");
            return Document::from_template();
        }

        if let Some(path) = &session.path {
            match Document::load(path) {
                Ok(doc) => {
                    info!("Restored session file: {}", path.display());
                    return match &session.content {
                        Some(content) => {
                            Document::restored(doc.path, content.clone(), doc.content)
                        }
                        None => doc,
                    };
                }
                Err(e) => warn!("Could not restore session file: {}", e),
            }
        }

        match &session.content {
            Some(content) => {
                info!("Restored unsaved session content");
                // Untitled work counts as modified unless it is the bare template
                let saved = if content == PLANT_TEMPLATE {
                    content.clone()
                } else {
                    String::new()
                };
                Document::restored(None, content.clone(), saved)
            }
            None => Document::from_template(),
        }
    }

    /// Record the document in `settings.session` for the next start.
    ///
    /// The content is kept only when it is not on disk: untitled documents
    /// and documents with unsaved changes.
    pub fn store_session(&mut self) {
        let doc = &self.document;
        self.settings.session.path = doc.path.clone();
        self.settings.session.content = if doc.path.is_none() || doc.is_modified() {
            Some(doc.content.clone())
        } else {
            None
        };
        self.settings_dirty = true;
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Rendering
    // ─────────────────────────────────────────────────────────────────────────

    /// Re-render the whole document into the preview.
    pub fn refresh_preview(&mut self) {
        self.preview_html = render(&self.document.content);
        self.preview_blocks = parse_fragment(&self.preview_html);
        self.render_count += 1;
        debug!(
            "Rendered preview #{} ({} blocks)",
            self.render_count,
            self.preview_blocks.len()
        );
    }

    /// Number of renders performed since start-up.
    #[cfg(test)]
    pub fn render_count(&self) -> u64 {
        self.render_count
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Document Lifecycle
    // ─────────────────────────────────────────────────────────────────────────

    /// Reset the document to the plant template.
    pub fn new_document(&mut self) {
        self.replace_document(Document::from_template());
        info!("Started new document from template");
    }

    /// Ask for a new document, confirming first when there are unsaved changes.
    ///
    /// Returns `true` if the document was replaced immediately.
    pub fn request_new_document(&mut self) -> bool {
        self.request_or_run(PendingAction::NewDocument)
    }

    /// Ask to open `path`, confirming first when there are unsaved changes.
    ///
    /// Returns `true` if the action ran immediately.
    pub fn request_open(&mut self, path: PathBuf) -> bool {
        self.request_or_run(PendingAction::OpenFile(path))
    }

    /// Ask to start a document from a template file.
    pub fn request_template(&mut self, path: PathBuf) -> bool {
        self.request_or_run(PendingAction::OpenTemplate(path))
    }

    fn request_or_run(&mut self, action: PendingAction) -> bool {
        if self.document.is_modified() {
            self.ui.show_confirm_dialog = true;
            self.ui.confirm_dialog_message = format!(
                "\"{}\" has unsaved changes. Discard them?",
                self.document.title().trim_end_matches('*')
            );
            self.ui.pending_action = Some(action);
            false
        } else {
            self.run_action(action);
            true
        }
    }

    /// Open a Markdown file, replacing the current document.
    ///
    /// On failure the current document is kept.
    pub fn open_file(&mut self, path: PathBuf) -> Result<()> {
        let doc = Document::load(&path)?;
        self.replace_document(doc);
        self.remember_file(path);
        Ok(())
    }

    /// Start an untitled document with the content of a template file.
    pub fn new_from_template(&mut self, path: &Path) -> Result<()> {
        let template = Document::load(path)?;
        self.replace_document(Document::new(template.content));
        info!("Started new document from {}", path.display());
        Ok(())
    }

    /// Save the document to its own path.
    ///
    /// Returns `Ok(false)` when the document has no path yet and needs
    /// Save As instead.
    pub fn save(&mut self) -> Result<bool> {
        let Some(path) = self.document.path.clone() else {
            return Ok(false);
        };
        self.document.save_to(&path)?;
        self.remember_file(path);
        Ok(true)
    }

    /// Save the document to `path` and adopt it.
    pub fn save_as(&mut self, path: PathBuf) -> Result<()> {
        self.document.save_to(&path)?;
        self.remember_file(path);
        Ok(())
    }

    fn replace_document(&mut self, doc: Document) {
        self.document = doc;
        self.refresh_preview();
        self.settings_dirty = true;
    }

    fn remember_file(&mut self, path: PathBuf) {
        if let Some(parent) = path.parent() {
            self.settings.last_directory = Some(parent.to_path_buf());
        }
        self.settings.add_recent_file(path);
        self.settings_dirty = true;
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Editing
    // ─────────────────────────────────────────────────────────────────────────

    /// Run a formatting command on the current selection.
    ///
    /// Returns whether the document changed.
    pub fn apply_format(&mut self, command: FormatCommand) -> bool {
        let result = markdown::apply_format(
            &self.document.content,
            self.document.selection_or_cursor(),
            command,
        );
        self.apply_edit(result)
    }

    /// Insert a reference to `image` at the cursor.
    ///
    /// Returns whether the image lies inside the project directory.
    pub fn insert_image(&mut self, image: &Path) -> bool {
        let (markup, inside) = image_markup(image, self.settings.project_directory.as_deref());
        let result = markdown::insert_literal(
            &self.document.content,
            self.document.selection_or_cursor(),
            &markup,
        );
        self.apply_edit(result);
        inside
    }

    fn apply_edit(&mut self, result: markdown::FormatResult) -> bool {
        let changed = self.document.apply(result);
        if changed {
            self.refresh_preview();
        }
        changed
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Project
    // ─────────────────────────────────────────────────────────────────────────

    /// Use `dir` as the project directory.
    pub fn set_project_dir(&mut self, dir: PathBuf) -> Result<()> {
        if !dir.is_dir() {
            return Err(Error::Application(format!(
                "Not a directory: {}",
                dir.display()
            )));
        }
        info!("Project directory: {}", dir.display());
        self.settings.project_directory = Some(dir);
        self.settings.show_project_panel = true;
        self.settings_dirty = true;
        self.refresh_project();
        Ok(())
    }

    /// Re-scan the project directory for articles and templates.
    pub fn refresh_project(&mut self) {
        match &self.settings.project_directory {
            Some(root) => {
                self.project_files = list_markdown_files(root);
                self.templates = list_templates(root);
                debug!(
                    "Project has {} file(s), {} template(s)",
                    self.project_files.len(),
                    self.templates.len()
                );
            }
            None => {
                self.project_files.clear();
                self.templates.clear();
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Settings Management
    // ─────────────────────────────────────────────────────────────────────────

    /// Update settings and mark as dirty.
    pub fn update_settings<F>(&mut self, f: F)
    where
        F: FnOnce(&mut Settings),
    {
        f(&mut self.settings);
        self.settings_dirty = true;
    }

    /// Save settings to config file if modified.
    ///
    /// Returns `true` if settings were saved.
    pub fn save_settings_if_dirty(&mut self) -> bool {
        if self.settings_dirty {
            if save_config_silent(&self.settings) {
                self.settings_dirty = false;
                info!("Settings saved");
                return true;
            }
            warn!("Failed to save settings");
        }
        false
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Event Handling
    // ─────────────────────────────────────────────────────────────────────────

    fn run_action(&mut self, action: PendingAction) {
        match action {
            PendingAction::Exit => debug!("Exit confirmed"),
            PendingAction::NewDocument => self.new_document(),
            PendingAction::OpenFile(path) => {
                if let Err(e) = self.open_file(path) {
                    warn!("{}", e);
                    self.notify(format!("Could not open file: {}", e));
                }
            }
            PendingAction::OpenTemplate(path) => {
                if let Err(e) = self.new_from_template(&path) {
                    warn!("{}", e);
                    self.notify(format!("Could not read template: {}", e));
                }
            }
        }
    }

    /// Handle a confirmed pending action.
    ///
    /// Returns the action that ran, so the caller can act on `Exit`.
    pub fn handle_confirmed_action(&mut self) -> Option<PendingAction> {
        let action = self.ui.pending_action.take();
        if let Some(action) = &action {
            self.run_action(action.clone());
        }
        self.ui.show_confirm_dialog = false;
        self.ui.confirm_dialog_message.clear();
        action
    }

    /// Cancel the pending action.
    pub fn cancel_pending_action(&mut self) {
        self.ui.pending_action = None;
        self.ui.show_confirm_dialog = false;
        self.ui.confirm_dialog_message.clear();
    }

    /// Request application exit.
    ///
    /// Returns `true` if exit can proceed immediately, `false` if confirmation is needed.
    pub fn request_exit(&mut self) -> bool {
        if self.document.is_modified() {
            self.ui.show_confirm_dialog = true;
            self.ui.confirm_dialog_message = "You have unsaved changes. Exit anyway?".to_string();
            self.ui.pending_action = Some(PendingAction::Exit);
            false
        } else {
            true
        }
    }

    /// Prepare state for application shutdown.
    pub fn shutdown(&mut self) {
        self.store_session();
        self.save_settings_if_dirty();
        info!("AppState shutdown complete");
    }

    // ─────────────────────────────────────────────────────────────────────────
    // UI State Helpers
    // ─────────────────────────────────────────────────────────────────────────

    /// Toggle the about window.
    pub fn toggle_about(&mut self) {
        self.ui.show_about = !self.ui.show_about;
    }

    /// Show a temporary toast message (disappears after duration).
    ///
    /// `current_time` should be the current app time in seconds.
    /// `duration` is how long to show the message in seconds.
    pub fn show_toast(&mut self, message: impl Into<String>, current_time: f64, duration: f64) {
        self.ui.toast_message = Some(message.into());
        self.ui.toast_expires_at = Some(current_time + duration);
    }

    /// Show a toast for the default duration, timed from the last frame.
    pub fn notify(&mut self, message: impl Into<String>) {
        let now = self.ui.now;
        self.show_toast(message, now, TOAST_DURATION);
    }

    /// Update toast state - clears expired toasts.
    ///
    /// Call this each frame with the current time.
    pub fn update_toast(&mut self, current_time: f64) {
        self.ui.now = current_time;
        if let Some(expires_at) = self.ui.toast_expires_at {
            if current_time >= expires_at {
                self.clear_toast();
            }
        }
    }

    /// Clear any active toast message.
    pub fn clear_toast(&mut self) {
        self.ui.toast_message = None;
        self.ui.toast_expires_at = None;
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SessionInfo;
    use std::fs;
    use tempfile::TempDir;

    fn fresh_state() -> AppState {
        AppState::with_settings(Settings::default())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Construction & Rendering
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_starts_with_rendered_template() {
        let state = fresh_state();
        assert_eq!(state.document.content, PLANT_TEMPLATE);
        assert_eq!(state.render_count(), 1);
        assert!(state.preview_html.contains("<h1>Plant</h1>"));
        assert!(!state.preview_blocks.is_empty());
    }

    #[test]
    fn test_new_document_resets_and_renders_once() {
        let mut state = fresh_state();
        state.document.set_content("# Fern".to_string());
        state.refresh_preview();
        let before = state.render_count();

        state.new_document();

        assert_eq!(state.document.content, PLANT_TEMPLATE);
        assert!(state.document.path.is_none());
        assert!(!state.document.is_modified());
        assert_eq!(state.render_count(), before + 1);
        assert!(state.preview_html.contains("<h1>Plant</h1>"));
    }

    #[test]
    fn test_request_new_document_confirms_when_modified() {
        let mut state = fresh_state();
        state.document.content.push_str("\nextra");

        assert!(!state.request_new_document());
        assert!(state.ui.show_confirm_dialog);
        assert_eq!(state.ui.pending_action, Some(PendingAction::NewDocument));
        assert!(state.document.content.ends_with("extra"));

        let ran = state.handle_confirmed_action();
        assert_eq!(ran, Some(PendingAction::NewDocument));
        assert_eq!(state.document.content, PLANT_TEMPLATE);
        assert!(!state.ui.show_confirm_dialog);
    }

    #[test]
    fn test_cancel_keeps_document() {
        let mut state = fresh_state();
        state.document.content.push_str("\nextra");
        state.request_new_document();
        state.cancel_pending_action();

        assert!(state.ui.pending_action.is_none());
        assert!(state.document.content.ends_with("extra"));
    }

    #[test]
    fn test_request_exit() {
        let mut state = fresh_state();
        assert!(state.request_exit());

        state.document.content.push('x');
        assert!(!state.request_exit());
        assert_eq!(state.ui.pending_action, Some(PendingAction::Exit));
    }

    // ─────────────────────────────────────────────────────────────────────────
    // File Operations
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_open_and_save_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("fern.md");
        fs::write(&path, "# Fern\n\nLikes **shade**.").unwrap();

        let mut state = fresh_state();
        state.open_file(path.clone()).unwrap();
        assert_eq!(state.document.path.as_ref(), Some(&path));
        assert!(state.preview_html.contains("<b>shade</b>"));
        assert_eq!(state.settings.recent_files.first(), Some(&path));
        assert_eq!(
            state.settings.last_directory.as_deref(),
            Some(temp_dir.path())
        );

        state.document.content.push_str("\n- water weekly");
        assert!(state.save().unwrap());
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "# Fern\n\nLikes **shade**.\n- water weekly"
        );
        assert!(!state.document.is_modified());
    }

    #[test]
    fn test_open_missing_file_keeps_document() {
        let temp_dir = TempDir::new().unwrap();
        let mut state = fresh_state();
        state.document.content.push_str("\nnotes");

        let result = state.open_file(temp_dir.path().join("missing.md"));
        assert!(matches!(result, Err(Error::FileRead { .. })));
        assert!(state.document.content.ends_with("notes"));
    }

    #[test]
    fn test_save_without_path_needs_save_as() {
        let temp_dir = TempDir::new().unwrap();
        let mut state = fresh_state();
        assert!(!state.save().unwrap());

        let path = temp_dir.path().join("new.md");
        state.save_as(path.clone()).unwrap();
        assert_eq!(state.document.path, Some(path.clone()));
        assert_eq!(fs::read_to_string(&path).unwrap(), PLANT_TEMPLATE);
    }

    #[test]
    fn test_new_from_template_is_untitled() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("cactus.md");
        fs::write(&path, "# Cactus").unwrap();

        let mut state = fresh_state();
        state.new_from_template(&path).unwrap();
        assert_eq!(state.document.content, "# Cactus");
        assert!(state.document.path.is_none());
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Editing
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_apply_format_rerenders() {
        let mut state = fresh_state();
        state.document.set_content("fern".to_string());
        state.document.selection = Some((0, 4));
        let before = state.render_count();

        assert!(state.apply_format(FormatCommand::Bold));
        assert_eq!(state.document.content, "**fern**");
        assert_eq!(state.render_count(), before + 1);
        assert!(state.preview_html.contains("<b>fern</b>"));
    }

    #[test]
    fn test_wrap_without_selection_does_not_render() {
        let mut state = fresh_state();
        state.document.selection = None;
        let before = state.render_count();

        assert!(!state.apply_format(FormatCommand::Italic));
        assert_eq!(state.render_count(), before);
    }

    #[test]
    fn test_insert_image_relative_to_project() {
        let temp_dir = TempDir::new().unwrap();
        let image = temp_dir.path().join("img").join("fern.png");

        let mut state = fresh_state();
        state.settings.project_directory = Some(temp_dir.path().to_path_buf());
        state.document.set_content(String::new());
        state.document.cursor = 0;
        state.document.selection = None;

        assert!(state.insert_image(&image));
        assert_eq!(
            state.document.content,
            "![Описание изображения](img/fern.png)"
        );
    }

    #[test]
    fn test_set_project_dir_lists_files() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("aloe.md"), "# Aloe").unwrap();
        fs::create_dir(temp_dir.path().join("templates")).unwrap();
        fs::write(temp_dir.path().join("templates").join("base.md"), "# Base").unwrap();

        let mut state = fresh_state();
        state.set_project_dir(temp_dir.path().to_path_buf()).unwrap();

        assert!(state.settings.show_project_panel);
        assert_eq!(state.templates.len(), 1);
        assert!(state
            .project_files
            .iter()
            .any(|f| f.path.ends_with("aloe.md")));
    }

    #[test]
    fn test_set_project_dir_rejects_file() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("a.md");
        fs::write(&file, "").unwrap();

        let mut state = fresh_state();
        assert!(state.set_project_dir(file).is_err());
        assert!(state.settings.project_directory.is_none());
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Session
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_store_session_for_saved_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("fern.md");
        fs::write(&path, "# Fern").unwrap();

        let mut state = fresh_state();
        state.open_file(path.clone()).unwrap();
        state.store_session();

        assert_eq!(state.settings.session.path, Some(path));
        assert!(state.settings.session.content.is_none());
    }

    #[test]
    fn test_store_session_keeps_unsaved_content() {
        let mut state = fresh_state();
        state.document.content = "# Draft".to_string();
        state.store_session();

        assert!(state.settings.session.path.is_none());
        assert_eq!(state.settings.session.content.as_deref(), Some("# Draft"));
    }

    #[test]
    fn test_restore_session_from_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("fern.md");
        fs::write(&path, "# Fern").unwrap();

        let mut settings = Settings::default();
        settings.session = SessionInfo {
            path: Some(path.clone()),
            content: None,
        };
        let state = AppState::with_settings(settings);

        assert_eq!(state.document.path, Some(path));
        assert_eq!(state.document.content, "# Fern");
        assert!(!state.document.is_modified());
    }

    #[test]
    fn test_restore_session_with_unsaved_changes() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("fern.md");
        fs::write(&path, "# Fern").unwrap();

        let mut settings = Settings::default();
        settings.session = SessionInfo {
            path: Some(path),
            content: Some("# Fern\nedited".to_string()),
        };
        let state = AppState::with_settings(settings);

        assert_eq!(state.document.content, "# Fern\nedited");
        assert!(state.document.is_modified());
    }

    #[test]
    fn test_restore_session_missing_path_falls_back() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("gone.md");

        let mut settings = Settings::default();
        settings.session = SessionInfo {
            path: Some(missing.clone()),
            content: Some("# Kept".to_string()),
        };
        let state = AppState::with_settings(settings);
        assert_eq!(state.document.content, "# Kept");
        assert!(state.document.path.is_none());

        let mut settings = Settings::default();
        settings.session = SessionInfo {
            path: Some(missing),
            content: None,
        };
        let state = AppState::with_settings(settings);
        assert_eq!(state.document.content, PLANT_TEMPLATE);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Toasts
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_toast_expires() {
        let mut state = fresh_state();
        state.update_toast(10.0);
        state.notify("Saved");
        assert_eq!(state.ui.toast_message.as_deref(), Some("Saved"));

        state.update_toast(10.0 + TOAST_DURATION - 0.5);
        assert!(state.ui.toast_message.is_some());

        state.update_toast(10.0 + TOAST_DURATION);
        assert!(state.ui.toast_message.is_none());
    }
}
