//! Native file dialog integration using the rfd crate
//!
//! Every dialog returns `None` when cancelled; callers treat that as a no-op.

use rfd::FileDialog;
use std::path::PathBuf;

/// File extension filters for supported file types.
pub const MARKDOWN_EXTENSIONS: &[&str] = &["md", "markdown"];
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp"];
const HTML_EXTENSIONS: &[&str] = &["html", "htm"];

fn with_directory(dialog: FileDialog, initial_dir: Option<&PathBuf>) -> FileDialog {
    match initial_dir {
        Some(dir) => dialog.set_directory(dir),
        None => dialog,
    }
}

/// Opens a native file dialog for selecting a Markdown document.
pub fn open_markdown_dialog(initial_dir: Option<&PathBuf>) -> Option<PathBuf> {
    let dialog = FileDialog::new()
        .set_title("Open Article")
        .add_filter("Markdown Files", MARKDOWN_EXTENSIONS)
        .add_filter("All Files", &["*"]);

    with_directory(dialog, initial_dir).pick_file()
}

/// Opens a native save dialog for a Markdown document.
pub fn save_markdown_dialog(
    initial_dir: Option<&PathBuf>,
    default_name: Option<&str>,
) -> Option<PathBuf> {
    let mut dialog = FileDialog::new()
        .set_title("Save Article")
        .add_filter("Markdown Files", MARKDOWN_EXTENSIONS)
        .add_filter("All Files", &["*"]);

    if let Some(name) = default_name {
        dialog = dialog.set_file_name(name);
    }

    with_directory(dialog, initial_dir).save_file()
}

/// Opens a native file dialog for picking an image to reference.
pub fn pick_image_dialog(initial_dir: Option<&PathBuf>) -> Option<PathBuf> {
    let dialog = FileDialog::new()
        .set_title("Choose Image")
        .add_filter("Images", IMAGE_EXTENSIONS);

    with_directory(dialog, initial_dir).pick_file()
}

/// Opens a native folder picker for the project directory.
pub fn pick_project_dialog(initial_dir: Option<&PathBuf>) -> Option<PathBuf> {
    let dialog = FileDialog::new().set_title("Open Project Folder");
    with_directory(dialog, initial_dir).pick_folder()
}

/// Opens a native save dialog for an HTML export.
pub fn save_html_dialog(
    initial_dir: Option<&PathBuf>,
    default_name: &str,
) -> Option<PathBuf> {
    let dialog = FileDialog::new()
        .set_title("Export HTML")
        .add_filter("HTML Files", HTML_EXTENSIONS)
        .set_file_name(default_name);

    with_directory(dialog, initial_dir).save_file()
}
