//! Markdown text-insertion actions
//!
//! Every toolbar button and formatting shortcut ends up here. The functions
//! take the full buffer plus the editor selection (character indices, as
//! reported by egui) and return the edited buffer with the cursor or
//! selection to restore. They never touch the document directly.
//!
//! # Supported Commands
//! - **Inline**: Bold, Italic, Inline Code, Strikethrough (wrap selection)
//! - **Literals**: Heading line `# `, list line `- `, image reference
//! - **Line toggles**: Heading levels 1-6, Blockquote

use crate::string_utils::{byte_to_char, char_to_byte, line_bounds};
use std::path::Path;

/// Alt text used for inserted image references.
pub const IMAGE_ALT_TEXT: &str = "Описание изображения";

// ─────────────────────────────────────────────────────────────────────────────
// Format Command Enum
// ─────────────────────────────────────────────────────────────────────────────

/// Formatting commands available from the toolbar and shortcuts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatCommand {
    /// Bold text (**text**)
    Bold,
    /// Italic text (*text*)
    Italic,
    /// Inline code (`code`)
    InlineCode,
    /// Strikethrough (~~text~~)
    Strikethrough,
    /// Insert a `# ` line at the cursor
    InsertHeading,
    /// Insert a `- ` line at the cursor
    InsertListItem,
    /// Toggle heading level 1-6 on the current line
    Heading(u8),
    /// Toggle `> ` on the current line
    Blockquote,
}

impl FormatCommand {
    /// Short label shown on the toolbar button.
    pub fn label(&self) -> String {
        match self {
            Self::Bold => "B".to_string(),
            Self::Italic => "I".to_string(),
            Self::InlineCode => "</>".to_string(),
            Self::Strikethrough => "S̶".to_string(),
            Self::InsertHeading => "#".to_string(),
            Self::InsertListItem => "\u{2022}".to_string(),
            Self::Heading(n) => format!("H{}", n),
            Self::Blockquote => "\u{275D}".to_string(),
        }
    }

    /// Tooltip text, with the shortcut when one exists.
    pub fn tooltip(&self) -> String {
        match self {
            Self::Bold => "Bold (Ctrl+B)".to_string(),
            Self::Italic => "Italic (Ctrl+I)".to_string(),
            Self::InlineCode => "Inline Code".to_string(),
            Self::Strikethrough => "Strikethrough".to_string(),
            Self::InsertHeading => "Insert Heading Line".to_string(),
            Self::InsertListItem => "Insert List Item".to_string(),
            Self::Heading(n) => format!("Heading {}", n),
            Self::Blockquote => "Blockquote".to_string(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Format Result
// ─────────────────────────────────────────────────────────────────────────────

/// Result of applying a formatting command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatResult {
    /// The new text after formatting
    pub text: String,
    /// New cursor position (character index)
    pub cursor: usize,
    /// New selection range (start, end) if applicable
    pub selection: Option<(usize, usize)>,
    /// Whether the text was changed in the "on" direction
    pub applied: bool,
}

impl FormatResult {
    fn with_cursor(text: String, cursor: usize) -> Self {
        Self {
            text,
            cursor,
            selection: None,
            applied: true,
        }
    }

    fn with_selection(text: String, start: usize, end: usize) -> Self {
        Self {
            text,
            cursor: end,
            selection: Some((start, end)),
            applied: true,
        }
    }

    fn toggled_off(mut self) -> Self {
        self.applied = false;
        self
    }

    /// Leave the text as it was.
    fn unchanged(text: &str, selection: (usize, usize)) -> Self {
        Self {
            text: text.to_string(),
            cursor: selection.1,
            selection: None,
            applied: false,
        }
    }

    /// Whether the command produced a different buffer.
    pub fn changed_from(&self, original: &str) -> bool {
        self.text != original
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Dispatch
// ─────────────────────────────────────────────────────────────────────────────

/// Apply a formatting command.
///
/// `selection` is `(start, end)` in character indices; an empty selection
/// (`start == end`) is the plain cursor position. Reversed ranges are
/// accepted.
pub fn apply_format(text: &str, selection: (usize, usize), command: FormatCommand) -> FormatResult {
    let selection = normalize(text, selection);
    match command {
        FormatCommand::Bold => wrap_selection(text, selection, "**"),
        FormatCommand::Italic => wrap_selection(text, selection, "*"),
        FormatCommand::InlineCode => wrap_selection(text, selection, "`"),
        FormatCommand::Strikethrough => wrap_selection(text, selection, "~~"),
        FormatCommand::InsertHeading => insert_literal(text, selection, "# \n"),
        FormatCommand::InsertListItem => insert_literal(text, selection, "- \n"),
        FormatCommand::Heading(level) => toggle_heading(text, selection, level),
        FormatCommand::Blockquote => toggle_blockquote(text, selection),
    }
}

fn normalize(text: &str, (a, b): (usize, usize)) -> (usize, usize) {
    let len = text.chars().count();
    let (a, b) = (a.min(len), b.min(len));
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Inline Wrapping
// ─────────────────────────────────────────────────────────────────────────────

/// Surround the selected text with `marker`. No selection means no edit.
fn wrap_selection(text: &str, (start, end): (usize, usize), marker: &str) -> FormatResult {
    if start == end {
        return FormatResult::unchanged(text, (start, end));
    }

    let byte_start = char_to_byte(text, start);
    let byte_end = char_to_byte(text, end);

    let mut new_text = String::with_capacity(text.len() + marker.len() * 2);
    new_text.push_str(&text[..byte_start]);
    new_text.push_str(marker);
    new_text.push_str(&text[byte_start..byte_end]);
    new_text.push_str(marker);
    new_text.push_str(&text[byte_end..]);

    // Keep the original words selected inside the markers
    let marker_chars = marker.chars().count();
    FormatResult::with_selection(new_text, start + marker_chars, end + marker_chars)
}

// ─────────────────────────────────────────────────────────────────────────────
// Literal Insertion
// ─────────────────────────────────────────────────────────────────────────────

/// Insert `literal` at the cursor, replacing any selected text.
///
/// The cursor ends up after the inserted text.
pub fn insert_literal(text: &str, (start, end): (usize, usize), literal: &str) -> FormatResult {
    let byte_start = char_to_byte(text, start);
    let byte_end = char_to_byte(text, end);

    let new_text = format!("{}{}{}", &text[..byte_start], literal, &text[byte_end..]);
    FormatResult::with_cursor(new_text, start + literal.chars().count())
}

/// Build the image reference for `image`, relative to `project` when the
/// image lies inside it.
///
/// Returns the Markdown and whether the image is inside the project.
pub fn image_markup(image: &Path, project: Option<&Path>) -> (String, bool) {
    let relative = project.and_then(|root| image.strip_prefix(root).ok());
    let inside = relative.is_some();
    let shown = relative.unwrap_or(image);

    // Forward slashes keep the reference portable between systems
    let link = shown.to_string_lossy().replace('\\', "/");
    let needs_brackets = link
        .chars()
        .any(|c| c.is_whitespace() || c == '(' || c == ')');
    let markup = if needs_brackets {
        format!("![{}](<{}>)", IMAGE_ALT_TEXT, link)
    } else {
        format!("![{}]({})", IMAGE_ALT_TEXT, link)
    };
    (markup, inside)
}

// ─────────────────────────────────────────────────────────────────────────────
// Line Toggles
// ─────────────────────────────────────────────────────────────────────────────

const HEADING_MARKERS: [&str; 6] = ["# ", "## ", "### ", "#### ", "##### ", "###### "];

/// Toggle a heading marker on the line holding the cursor.
///
/// An empty line gets the marker. A line with the same marker loses it. A
/// line with a different level has its marker replaced.
fn toggle_heading(text: &str, (_, end): (usize, usize), level: u8) -> FormatResult {
    let level = level.clamp(1, 6) as usize;
    let marker = HEADING_MARKERS[level - 1];

    let cursor_byte = char_to_byte(text, end);
    let (line_start, line_end) = line_bounds(text, cursor_byte);
    let line = &text[line_start..line_end];

    let (new_line, toggled_off) = if line.trim().is_empty() {
        (marker.to_string(), false)
    } else {
        let trimmed = line.trim_start();
        let existing = HEADING_MARKERS
            .iter()
            .rev()
            .find(|m| trimmed.starts_with(*m));
        match existing {
            Some(m) if *m == marker => (trimmed[m.len()..].to_string(), true),
            Some(m) => (format!("{}{}", marker, &trimmed[m.len()..]), false),
            None => (format!("{}{}", marker, trimmed), false),
        }
    };

    let new_text = format!("{}{}{}", &text[..line_start], new_line, &text[line_end..]);
    let cursor = byte_to_char(&new_text, line_start + new_line.len());

    let result = FormatResult::with_cursor(new_text, cursor);
    if toggled_off {
        result.toggled_off()
    } else {
        result
    }
}

/// Toggle `> ` at the start of the line holding the cursor.
fn toggle_blockquote(text: &str, (_, end): (usize, usize)) -> FormatResult {
    let cursor_byte = char_to_byte(text, end);
    let (line_start, line_end) = line_bounds(text, cursor_byte);
    let line = &text[line_start..line_end];

    let (new_line, toggled_off) = match line.strip_prefix("> ") {
        Some(rest) => (rest.to_string(), true),
        None => (format!("> {}", line), false),
    };

    let new_text = format!("{}{}{}", &text[..line_start], new_line, &text[line_end..]);
    let cursor = byte_to_char(&new_text, line_start + new_line.len());

    let result = FormatResult::with_cursor(new_text, cursor);
    if toggled_off {
        result.toggled_off()
    } else {
        result
    }
}
