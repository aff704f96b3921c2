//! The single editable document
//!
//! Plain text is the only representation of an article. The document keeps
//! its content, the content last written to disk (for modification
//! tracking), the file it belongs to, and the editor cursor and selection as
//! reported by egui.

use crate::error::{Error, Result};
use crate::markdown::{FormatResult, PLANT_TEMPLATE};
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

/// Runtime state of the open document.
#[derive(Debug, Clone)]
pub struct Document {
    /// File path (None for unsaved/new documents)
    pub path: Option<PathBuf>,
    /// Document content
    pub content: String,
    /// Content as last loaded or saved (for detecting modifications)
    original_content: String,
    /// Cursor position as a character index
    pub cursor: usize,
    /// Text selection range (start_char_index, end_char_index) - None if no selection
    pub selection: Option<(usize, usize)>,
    /// Cursor/selection the editor should adopt on the next frame
    pub pending_cursor: Option<(usize, usize)>,
    /// Incremented whenever content is replaced from outside the editor widget
    content_version: u64,
    /// Whether the editor should request focus on next frame
    pub needs_focus: bool,
}

impl Document {
    /// Create an unsaved document with the given content.
    ///
    /// The content counts as unmodified.
    pub fn new(content: impl Into<String>) -> Self {
        let content = content.into();
        Self {
            path: None,
            original_content: content.clone(),
            content,
            cursor: 0,
            selection: None,
            pending_cursor: None,
            content_version: 0,
            needs_focus: true,
        }
    }

    /// Create an unsaved document holding the plant template.
    pub fn from_template() -> Self {
        Self::new(PLANT_TEMPLATE)
    }

    /// Read a document from disk.
    ///
    /// Invalid UTF-8 sequences are replaced rather than rejected.
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = fs::read(path).map_err(|e| Error::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let content = String::from_utf8_lossy(&bytes).into_owned();

        info!("Loaded {} ({} bytes)", path.display(), bytes.len());
        let mut doc = Self::new(content);
        doc.path = Some(path.to_path_buf());
        Ok(doc)
    }

    /// Restore a document from session data.
    ///
    /// `saved_content` is what the document counts as unmodified against.
    pub fn restored(path: Option<PathBuf>, content: String, saved_content: String) -> Self {
        let mut doc = Self::new(content);
        doc.original_content = saved_content;
        doc.path = path;
        doc.needs_focus = false;
        doc
    }

    /// Write the content to `path` and adopt it as the document's file.
    ///
    /// On failure the document is left unchanged.
    pub fn save_to(&mut self, path: &Path) -> Result<()> {
        fs::write(path, self.content.as_bytes()).map_err(|e| Error::FileWrite {
            path: path.to_path_buf(),
            source: e,
        })?;

        self.path = Some(path.to_path_buf());
        self.mark_saved();
        info!("Saved file: {}", path.display());
        Ok(())
    }

    /// Check if the document has unsaved changes.
    pub fn is_modified(&self) -> bool {
        self.content != self.original_content
    }

    /// Mark the current content as saved.
    pub fn mark_saved(&mut self) {
        self.original_content = self.content.clone();
    }

    /// Get the display title for the window and the confirm dialog.
    pub fn title(&self) -> String {
        let name = self
            .path
            .as_ref()
            .and_then(|p| p.file_name())
            .and_then(|n| n.to_str())
            .unwrap_or("Untitled");

        if self.is_modified() {
            format!("{}*", name)
        } else {
            name.to_string()
        }
    }

    /// Directory of the document's file, if it has one.
    pub fn directory(&self) -> Option<&Path> {
        self.path.as_deref().and_then(Path::parent)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Programmatic Edits
    // ─────────────────────────────────────────────────────────────────────────

    /// Get the content version counter.
    ///
    /// The editor widget keys its state on this so that content replaced
    /// outside the widget is re-read.
    pub fn content_version(&self) -> u64 {
        self.content_version
    }

    /// Replace the content from outside the editor widget.
    pub fn set_content(&mut self, new_content: String) {
        if new_content != self.content {
            self.content = new_content;
            self.content_version += 1;
        }
    }

    /// The current selection, or an empty range at the cursor.
    pub fn selection_or_cursor(&self) -> (usize, usize) {
        self.selection.unwrap_or((self.cursor, self.cursor))
    }

    /// Adopt the outcome of a formatting command.
    ///
    /// Returns whether the content changed.
    pub fn apply(&mut self, result: FormatResult) -> bool {
        let changed = result.changed_from(&self.content);
        let (start, end) = result.selection.unwrap_or((result.cursor, result.cursor));

        self.set_content(result.text);
        self.cursor = end;
        self.selection = result.selection;
        self.pending_cursor = Some((start, end));
        self.needs_focus = true;

        debug!("Applied edit, changed: {}", changed);
        changed
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::from_template()
    }
}
