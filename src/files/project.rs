//! Project directory listing
//!
//! A project is just a folder of articles. The side panel shows every
//! Markdown file below it, and `<project>/templates` holds the starting
//! points offered by "New from template".

use super::dialogs::MARKDOWN_EXTENSIONS;
use log::{debug, warn};
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// How deep below the project root articles are listed.
pub const MAX_PROJECT_DEPTH: usize = 4;

/// Name of the templates subdirectory.
pub const TEMPLATES_DIR: &str = "templates";

/// An article found in the project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectFile {
    /// Absolute path to the file
    pub path: PathBuf,
    /// Path relative to the project root, for display
    pub relative: PathBuf,
}

impl ProjectFile {
    /// Label shown in the side panel.
    pub fn label(&self) -> String {
        self.relative.to_string_lossy().replace('\\', "/")
    }
}

/// Check if a path has a Markdown extension.
pub fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|ext| {
            MARKDOWN_EXTENSIONS
                .iter()
                .any(|m| m.eq_ignore_ascii_case(ext))
        })
        .unwrap_or(false)
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry
            .file_name()
            .to_str()
            .map(|s| s.starts_with('.'))
            .unwrap_or(false)
}

/// List the Markdown files below `root`, sorted by relative path.
///
/// Hidden files and directories are skipped. Unreadable entries are logged
/// and skipped.
pub fn list_markdown_files(root: &Path) -> Vec<ProjectFile> {
    let mut files: Vec<ProjectFile> = WalkDir::new(root)
        .max_depth(MAX_PROJECT_DEPTH)
        .into_iter()
        .filter_entry(|e| !is_hidden(e))
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("Skipping unreadable project entry: {}", e);
                None
            }
        })
        .filter(|e| e.file_type().is_file() && is_markdown_file(e.path()))
        .filter_map(|e| {
            let relative = e.path().strip_prefix(root).ok()?.to_path_buf();
            Some(ProjectFile {
                path: e.path().to_path_buf(),
                relative,
            })
        })
        .collect();

    files.sort_by(|a, b| a.relative.cmp(&b.relative));
    debug!("Found {} article(s) in {}", files.len(), root.display());
    files
}

/// List the templates available in a project's `templates` directory.
pub fn list_templates(root: &Path) -> Vec<ProjectFile> {
    let dir = root.join(TEMPLATES_DIR);
    if !dir.is_dir() {
        return Vec::new();
    }

    let mut templates: Vec<ProjectFile> = WalkDir::new(&dir)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && is_markdown_file(e.path()))
        .map(|e| ProjectFile {
            relative: PathBuf::from(e.file_name()),
            path: e.into_path(),
        })
        .collect();

    templates.sort_by(|a, b| a.relative.cmp(&b.relative));
    templates
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, "# x").unwrap();
    }

    #[test]
    fn test_is_markdown_file() {
        assert!(is_markdown_file(Path::new("fern.md")));
        assert!(is_markdown_file(Path::new("FERN.MD")));
        assert!(is_markdown_file(Path::new("notes.markdown")));
        assert!(!is_markdown_file(Path::new("photo.png")));
        assert!(!is_markdown_file(Path::new("README")));
    }

    #[test]
    fn test_list_markdown_files_sorted_and_filtered() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "b.md");
        touch(dir.path(), "a.md");
        touch(dir.path(), "ferns/maidenhair.md");
        touch(dir.path(), "img/leaf.png");
        touch(dir.path(), ".hidden/secret.md");

        let labels: Vec<String> = list_markdown_files(dir.path())
            .iter()
            .map(|f| f.label())
            .collect();
        assert_eq!(labels, vec!["a.md", "b.md", "ferns/maidenhair.md"]);
    }

    #[test]
    fn test_list_respects_depth() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "1/2/3/4/5/deep.md");
        touch(dir.path(), "1/2/3/shallow.md");

        let files = list_markdown_files(dir.path());
        assert_eq!(files.len(), 1);
        assert!(files[0].path.ends_with("shallow.md"));
    }

    #[test]
    fn test_list_templates() {
        let dir = TempDir::new().unwrap();
        assert!(list_templates(dir.path()).is_empty());

        touch(dir.path(), "templates/succulent.md");
        touch(dir.path(), "templates/cactus.md");
        touch(dir.path(), "templates/nested/ignored.md");

        let names: Vec<String> = list_templates(dir.path())
            .iter()
            .map(|t| t.label())
            .collect();
        assert_eq!(names, vec!["cactus.md", "succulent.md"]);
    }
}
