//! Raw Markdown editor widget for Plantbook
//!
//! This module implements the editor pane using egui's TextEdit with a
//! layouter that runs the per-line Markdown highlighter, and keeps the
//! document's cursor and selection in sync with the widget.

use crate::document::Document;
use crate::markdown::layout_job;
use egui::{self, ScrollArea, TextEdit, Ui};
use log::debug;
use std::sync::Arc;

/// Result of showing the editor widget.
pub struct EditorOutput {
    /// Whether the content was modified.
    pub changed: bool,
}

/// A highlighted text editor bound to the open document.
///
/// # Example
///
/// ```ignore
/// let output = EditorWidget::new(&mut state.document)
///     .font_size(settings.font_size)
///     .word_wrap(settings.word_wrap)
///     .show(ui);
/// if output.changed {
///     state.refresh_preview();
/// }
/// ```
pub struct EditorWidget<'a> {
    /// The document being edited.
    doc: &'a mut Document,
    /// Font size for the editor.
    font_size: f32,
    /// Whether word wrap is enabled.
    word_wrap: bool,
    /// ID for the editor (for state persistence).
    id: Option<egui::Id>,
}

impl<'a> EditorWidget<'a> {
    /// Create a new editor widget for the given document.
    pub fn new(doc: &'a mut Document) -> Self {
        Self {
            doc,
            font_size: 14.0,
            word_wrap: true,
            id: None,
        }
    }

    /// Set the font size.
    #[must_use]
    pub fn font_size(mut self, size: f32) -> Self {
        self.font_size = size;
        self
    }

    /// Enable or disable word wrap.
    #[must_use]
    pub fn word_wrap(mut self, wrap: bool) -> Self {
        self.word_wrap = wrap;
        self
    }

    /// Set a custom ID for the editor.
    #[must_use]
    pub fn id(mut self, id: egui::Id) -> Self {
        self.id = Some(id);
        self
    }

    /// Show the editor and return the output.
    pub fn show(self, ui: &mut Ui) -> EditorOutput {
        // Content replaced from outside the widget gets a fresh TextEdit so
        // egui re-reads the string instead of keeping stale galley state
        let base_id = self.id.unwrap_or_else(|| ui.id().with("editor"));
        let id = base_id.with(self.doc.content_version());

        let needs_focus = std::mem::take(&mut self.doc.needs_focus);

        if let Some((start, end)) = self.doc.pending_cursor.take() {
            let mut state = TextEdit::load_state(ui.ctx(), id).unwrap_or_default();
            let range = egui::text::CCursorRange::two(
                egui::text::CCursor::new(start),
                egui::text::CCursor::new(end),
            );
            state.cursor.set_char_range(Some(range));
            state.store(ui.ctx(), id);
        }

        let original_content = self.doc.content.clone();

        let font_size = self.font_size;
        let word_wrap = self.word_wrap;
        let mut layouter = move |ui: &Ui, text: &str, wrap_width: f32| -> Arc<egui::Galley> {
            let width = if word_wrap { wrap_width } else { f32::INFINITY };
            let job = layout_job(text, font_size, width, ui.visuals().text_color());
            ui.fonts(|f| f.layout_job(job))
        };

        let content = &mut self.doc.content;
        let scroll_output = ScrollArea::vertical()
            .id_source(base_id.with("scroll"))
            .auto_shrink([false, false])
            .show(ui, |ui| {
                let text_output = TextEdit::multiline(content)
                    .id(id)
                    .frame(false)
                    .desired_width(f32::INFINITY)
                    .desired_rows(24)
                    .lock_focus(true)
                    .layouter(&mut layouter)
                    .show(ui);

                if needs_focus {
                    text_output.response.request_focus();
                }
                text_output
            });

        let text_output = scroll_output.inner;
        let changed = self.doc.content != original_content;
        if changed {
            debug!("Editor content changed");
        }

        if let Some(cursor_range) = text_output.cursor_range {
            let primary = cursor_range.primary.ccursor.index;
            let secondary = cursor_range.secondary.ccursor.index;

            self.doc.cursor = primary;
            self.doc.selection = if primary != secondary {
                Some((primary.min(secondary), primary.max(secondary)))
            } else {
                None
            };
        }

        EditorOutput { changed }
    }
}
