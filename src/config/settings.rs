//! User settings and preferences for Plantbook
//!
//! This module defines the `Settings` struct that holds all user-configurable
//! options, with serde support for JSON persistence.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ─────────────────────────────────────────────────────────────────────────────
// Window Size Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Window dimensions and position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowSize {
    /// Window width in pixels
    pub width: f32,
    /// Window height in pixels
    pub height: f32,
    /// Window X position (optional, for restoring position)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f32>,
    /// Window Y position (optional, for restoring position)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f32>,
    /// Whether the window was maximized
    #[serde(default)]
    pub maximized: bool,
}

impl Default for WindowSize {
    fn default() -> Self {
        Self {
            width: 1100.0,
            height: 720.0,
            x: None,
            y: None,
            maximized: false,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Session Information
// ─────────────────────────────────────────────────────────────────────────────

/// The document that was open when the app last closed.
///
/// `content` is only stored when the document had unsaved changes or no
/// file at all; otherwise the file at `path` is read back.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionInfo {
    /// Path of the open document
    #[serde(default)]
    pub path: Option<PathBuf>,
    /// Unsaved content of the open document
    #[serde(default)]
    pub content: Option<String>,
}

impl SessionInfo {
    /// Whether there is anything to restore.
    pub fn is_empty(&self) -> bool {
        self.path.is_none() && self.content.is_none()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Main Settings Struct
// ─────────────────────────────────────────────────────────────────────────────

/// User preferences and application settings.
///
/// This struct is serialized to JSON and persisted to the user's config directory.
/// All fields have sensible defaults via the `Default` trait and `#[serde(default)]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // ─────────────────────────────────────────────────────────────────────────
    // Editor
    // ─────────────────────────────────────────────────────────────────────────
    /// Font size for the editor and preview (in points)
    pub font_size: f32,

    /// Whether to enable word wrap in the editor
    pub word_wrap: bool,

    // ─────────────────────────────────────────────────────────────────────────
    // Layout
    // ─────────────────────────────────────────────────────────────────────────
    /// Whether the raw editor pane is visible
    pub show_editor: bool,

    /// Whether the preview pane is visible
    pub show_preview: bool,

    /// Whether the project file list is visible
    pub show_project_panel: bool,

    /// Share of the width given to the editor when both panes are shown
    pub split_ratio: f32,

    /// Window size and position
    pub window_size: WindowSize,

    // ─────────────────────────────────────────────────────────────────────────
    // Directories & History
    // ─────────────────────────────────────────────────────────────────────────
    /// Project directory shown in the side panel and used for image paths
    pub project_directory: Option<PathBuf>,

    /// Last directory used by a file dialog
    pub last_directory: Option<PathBuf>,

    /// Recently opened files (most recent first)
    pub recent_files: Vec<PathBuf>,

    /// Maximum number of recent files to remember
    pub max_recent_files: usize,

    // ─────────────────────────────────────────────────────────────────────────
    // Export
    // ─────────────────────────────────────────────────────────────────────────
    /// Whether to open exported files after export
    pub open_after_export: bool,

    // ─────────────────────────────────────────────────────────────────────────
    // Session
    // ─────────────────────────────────────────────────────────────────────────
    /// The document to restore at start-up
    pub session: SessionInfo,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            font_size: 14.0,
            word_wrap: true,

            show_editor: true,
            show_preview: true,
            show_project_panel: false,
            split_ratio: 0.5,
            window_size: WindowSize::default(),

            project_directory: None,
            last_directory: None,
            recent_files: Vec::new(),
            max_recent_files: 10,

            open_after_export: false,

            session: SessionInfo::default(),
        }
    }
}

impl Settings {
    /// Add a file to the recent files list.
    ///
    /// If the file already exists in the list, it's moved to the front.
    /// The list is trimmed to `max_recent_files`.
    pub fn add_recent_file(&mut self, path: PathBuf) {
        self.recent_files.retain(|p| p != &path);
        self.recent_files.insert(0, path);
        self.recent_files.truncate(self.max_recent_files);
    }

    /// Directory a file dialog should start in.
    pub fn dialog_directory(&self) -> Option<&PathBuf> {
        self.last_directory
            .as_ref()
            .or(self.project_directory.as_ref())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Validation Constants and Sanitization
    // ─────────────────────────────────────────────────────────────────────────

    /// Minimum allowed font size.
    pub const MIN_FONT_SIZE: f32 = 8.0;
    /// Maximum allowed font size.
    pub const MAX_FONT_SIZE: f32 = 48.0;
    /// Minimum window dimension.
    pub const MIN_WINDOW_SIZE: f32 = 300.0;
    /// Maximum window dimension.
    pub const MAX_WINDOW_SIZE: f32 = 10000.0;
    /// Smallest share of the width either pane may get.
    pub const MIN_SPLIT_RATIO: f32 = 0.15;
    /// Largest share of the width the editor may get.
    pub const MAX_SPLIT_RATIO: f32 = 0.85;
    /// Upper bound for the recent files list.
    pub const MAX_RECENT_FILES_LIMIT: usize = 50;

    /// Sanitize settings by clamping values to valid ranges.
    ///
    /// This is useful after loading settings from a file that might have
    /// been manually edited with invalid values.
    pub fn sanitize(&mut self) {
        if !self.font_size.is_finite() {
            self.font_size = Self::default().font_size;
        }
        self.font_size = self
            .font_size
            .clamp(Self::MIN_FONT_SIZE, Self::MAX_FONT_SIZE);

        self.window_size.width = self
            .window_size
            .width
            .clamp(Self::MIN_WINDOW_SIZE, Self::MAX_WINDOW_SIZE);
        self.window_size.height = self
            .window_size
            .height
            .clamp(Self::MIN_WINDOW_SIZE, Self::MAX_WINDOW_SIZE);

        if !self.split_ratio.is_finite() {
            self.split_ratio = 0.5;
        }
        self.split_ratio = self
            .split_ratio
            .clamp(Self::MIN_SPLIT_RATIO, Self::MAX_SPLIT_RATIO);

        if self.max_recent_files == 0 {
            self.max_recent_files = 10;
        } else if self.max_recent_files > Self::MAX_RECENT_FILES_LIMIT {
            self.max_recent_files = Self::MAX_RECENT_FILES_LIMIT;
        }
        self.recent_files.truncate(self.max_recent_files);
    }

    /// Load settings and sanitize them to ensure validity.
    pub fn from_json_sanitized(json: &str) -> Result<Self, serde_json::Error> {
        let mut settings: Self = serde_json::from_str(json)?;
        settings.sanitize();
        Ok(settings)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_default() {
        let settings = Settings::default();
        assert_eq!(settings.font_size, 14.0);
        assert!(settings.word_wrap);
        assert!(settings.show_editor);
        assert!(settings.show_preview);
        assert!(!settings.show_project_panel);
        assert!(settings.session.is_empty());
    }

    #[test]
    fn test_settings_serialize_deserialize() {
        let original = Settings {
            font_size: 18.0,
            show_preview: false,
            project_directory: Some(PathBuf::from("/plants")),
            session: SessionInfo {
                path: None,
                content: Some("# Draft".to_string()),
            },
            ..Settings::default()
        };

        let json = serde_json::to_string_pretty(&original).unwrap();
        let deserialized: Settings = serde_json::from_str(&json).unwrap();

        assert_eq!(original, deserialized);
    }

    #[test]
    fn test_settings_deserialize_with_missing_fields() {
        let json = r#"{"font_size": 20.0}"#;
        let settings: Settings = serde_json::from_str(json).unwrap();

        assert_eq!(settings.font_size, 20.0);
        assert!(settings.word_wrap);
        assert_eq!(settings.max_recent_files, 10);
    }

    #[test]
    fn test_add_recent_file() {
        let mut settings = Settings {
            max_recent_files: 2,
            ..Settings::default()
        };
        settings.add_recent_file(PathBuf::from("a.md"));
        settings.add_recent_file(PathBuf::from("b.md"));
        settings.add_recent_file(PathBuf::from("a.md"));
        settings.add_recent_file(PathBuf::from("c.md"));

        assert_eq!(
            settings.recent_files,
            vec![PathBuf::from("c.md"), PathBuf::from("a.md")]
        );
    }

    #[test]
    fn test_sanitize_clamps_values() {
        let mut settings = Settings {
            font_size: 2.0,
            split_ratio: 3.0,
            max_recent_files: 0,
            window_size: WindowSize {
                width: 10.0,
                height: 99999.0,
                ..WindowSize::default()
            },
            ..Settings::default()
        };
        settings.sanitize();

        assert_eq!(settings.font_size, Settings::MIN_FONT_SIZE);
        assert_eq!(settings.split_ratio, Settings::MAX_SPLIT_RATIO);
        assert_eq!(settings.max_recent_files, 10);
        assert_eq!(settings.window_size.width, Settings::MIN_WINDOW_SIZE);
        assert_eq!(settings.window_size.height, Settings::MAX_WINDOW_SIZE);
    }

    #[test]
    fn test_sanitize_truncates_recent_files() {
        let mut settings = Settings {
            max_recent_files: 1,
            recent_files: vec![PathBuf::from("a.md"), PathBuf::from("b.md")],
            ..Settings::default()
        };
        settings.sanitize();
        assert_eq!(settings.recent_files.len(), 1);
    }

    #[test]
    fn test_from_json_sanitized() {
        let settings = Settings::from_json_sanitized(r#"{"font_size": 200.0}"#).unwrap();
        assert_eq!(settings.font_size, Settings::MAX_FONT_SIZE);
        assert!(Settings::from_json_sanitized("{ nope").is_err());
    }

    #[test]
    fn test_dialog_directory_prefers_last_used() {
        let mut settings = Settings {
            project_directory: Some(PathBuf::from("/plants")),
            ..Settings::default()
        };
        assert_eq!(settings.dialog_directory(), Some(&PathBuf::from("/plants")));

        settings.last_directory = Some(PathBuf::from("/tmp"));
        assert_eq!(settings.dialog_directory(), Some(&PathBuf::from("/tmp")));
    }
}
