//! Project sidebar panel.
//!
//! Lists the Markdown articles found under the project directory and opens
//! one on click.

use crate::files::ProjectFile;
use crate::ui::AppAction;
use eframe::egui::{self, Color32, RichText, ScrollArea};
use std::path::Path;

/// Default width of the project panel.
const DEFAULT_PANEL_WIDTH: f32 = 220.0;

/// Minimum width of the project panel.
const MIN_PANEL_WIDTH: f32 = 140.0;

/// Maximum width of the project panel.
const MAX_PANEL_WIDTH: f32 = 480.0;

/// Left sidebar with the project's articles.
pub struct ProjectPanel<'a> {
    root: Option<&'a Path>,
    files: &'a [ProjectFile],
    current: Option<&'a Path>,
}

impl<'a> ProjectPanel<'a> {
    pub fn new(root: Option<&'a Path>, files: &'a [ProjectFile]) -> Self {
        Self {
            root,
            files,
            current: None,
        }
    }

    /// Highlight the entry for the open document.
    #[must_use]
    pub fn current(mut self, path: Option<&'a Path>) -> Self {
        self.current = path;
        self
    }

    /// Show the panel and return any triggered action.
    pub fn show(self, ctx: &egui::Context) -> Option<AppAction> {
        let mut action = None;

        egui::SidePanel::left("project_panel")
            .resizable(true)
            .default_width(DEFAULT_PANEL_WIDTH)
            .width_range(MIN_PANEL_WIDTH..=MAX_PANEL_WIDTH)
            .frame(
                egui::Frame::none()
                    .fill(Color32::from_rgb(245, 245, 245))
                    .inner_margin(egui::Margin::same(6.0))
                    .stroke(egui::Stroke::new(1.0, Color32::from_rgb(200, 200, 200))),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(RichText::new("\u{1F4C1}").size(14.0));
                    let name = self
                        .root
                        .and_then(Path::file_name)
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_else(|| "No project".to_string());
                    ui.add(egui::Label::new(RichText::new(name).size(12.0).strong()).truncate());

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui
                            .small_button("\u{2715}")
                            .on_hover_text("Hide project panel")
                            .clicked()
                        {
                            action = Some(AppAction::ToggleProjectPanel);
                        }
                        if self.root.is_some()
                            && ui.small_button("\u{21BB}").on_hover_text("Refresh").clicked()
                        {
                            action = Some(AppAction::RefreshProject);
                        }
                    });
                });
                ui.separator();

                if self.root.is_none() {
                    ui.add_space(8.0);
                    ui.label(RichText::new("Open a folder of articles to list them here.").weak());
                    if ui.button("Open project\u{2026}").clicked() {
                        action = Some(AppAction::OpenProject);
                    }
                    return;
                }

                if self.files.is_empty() {
                    ui.label(RichText::new("No Markdown files found.").weak());
                    return;
                }

                ScrollArea::vertical()
                    .id_source("project_scroll")
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        for file in self.files {
                            let selected = self.current == Some(file.path.as_path());
                            let response = ui
                                .selectable_label(selected, file.label())
                                .on_hover_text(file.path.display().to_string());
                            if response.clicked() && !selected {
                                action = Some(AppAction::OpenPath(file.path.clone()));
                            }
                        }
                    });
            });

        action
    }
}
