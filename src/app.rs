//! Main application module for Plantbook
//!
//! This module implements the eframe App trait for the main application,
//! handling window management, UI updates, and event processing.
//!
//! Menus, the toolbar, the project panel, shortcuts and drag & drop all
//! produce [`AppAction`]s while the frame is drawn. They are dispatched once
//! the frame is complete, so the editor has already reported its selection.

use crate::config::{Settings, WindowSize};
use crate::editor::EditorWidget;
use crate::export::{copy_html_to_clipboard, export_to_html_file};
use crate::files::dialogs::{
    open_markdown_dialog, pick_image_dialog, pick_project_dialog, save_html_dialog,
    save_markdown_dialog,
};
use crate::files::project::is_markdown_file;
use crate::preview::PreviewView;
use crate::state::{AppState, PendingAction};
use crate::string_utils::char_index_to_line_col;
use crate::ui::{shortcut_action, AboutPanel, AppAction, ProjectPanel, Toolbar};
use eframe::egui;
use log::{debug, info, warn};
use std::path::PathBuf;

/// Application name shown in the window title.
const APP_NAME: &str = "Plantbook";

/// The main application struct that holds all state and implements eframe::App.
pub struct PlantbookApp {
    /// Central application state
    state: AppState,
    /// Toolbar UI component
    toolbar: Toolbar,
    /// About/Help window component
    about_panel: AboutPanel,
    /// Track if we should exit (after confirmation)
    should_exit: bool,
    /// Last title sent to the viewport
    last_title: String,
    /// Last known window size (for detecting changes)
    last_window_size: Option<egui::Vec2>,
    /// Last known window position (for detecting changes)
    last_window_pos: Option<egui::Pos2>,
    /// Application start time for timing toast messages
    start_time: std::time::Instant,
}

impl PlantbookApp {
    /// Create a new PlantbookApp instance.
    ///
    /// This loads the settings, restores the previous session and applies
    /// the light visuals the article colours are designed for.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        info!("Initializing {}", APP_NAME);

        cc.egui_ctx.set_visuals(egui::Visuals::light());

        Self {
            state: AppState::new(),
            toolbar: Toolbar,
            about_panel: AboutPanel::new(),
            should_exit: false,
            last_title: String::new(),
            last_window_size: None,
            last_window_pos: None,
            start_time: std::time::Instant::now(),
        }
    }

    /// Get elapsed time since app start in seconds.
    fn get_app_time(&self) -> f64 {
        self.start_time.elapsed().as_secs_f64()
    }

    /// Update window size in settings if changed.
    ///
    /// Returns `true` if the window state was updated.
    fn update_window_state(&mut self, ctx: &egui::Context) -> bool {
        // Size is restored as the inner size, position as the outer one
        let (inner, outer) = ctx.input(|i| (i.viewport().inner_rect, i.viewport().outer_rect));
        let (Some(inner), Some(outer)) = (inner, outer) else {
            return false;
        };
        let current_size = inner.size();
        let current_pos = outer.min;

        let size_changed = self
            .last_window_size
            .map(|s| (s - current_size).length() > 1.0)
            .unwrap_or(true);
        let pos_changed = self
            .last_window_pos
            .map(|p| (p - current_pos).length() > 1.0)
            .unwrap_or(true);

        if !size_changed && !pos_changed {
            return false;
        }

        self.last_window_size = Some(current_size);
        self.last_window_pos = Some(current_pos);
        let maximized = ctx.input(|i| i.viewport().maximized.unwrap_or(false));

        self.state.update_settings(|settings| {
            // Keep the restored size when maximized
            if !maximized {
                settings.window_size = WindowSize {
                    width: current_size.x,
                    height: current_size.y,
                    x: Some(current_pos.x),
                    y: Some(current_pos.y),
                    maximized,
                };
            } else {
                settings.window_size.maximized = true;
            }
        });

        debug!(
            "Window state updated: {}x{} at ({}, {}), maximized: {}",
            current_size.x, current_size.y, current_pos.x, current_pos.y, maximized
        );
        true
    }

    /// Get the window title: "Filename - Plantbook".
    fn window_title(&self) -> String {
        format!("{} - {}", self.state.document.title(), APP_NAME)
    }

    /// Handle close request from the window.
    ///
    /// Returns `true` if the application should close.
    fn handle_close_request(&mut self) -> bool {
        self.should_exit || self.state.request_exit()
    }

    /// Show a toast at the current app time.
    fn toast(&mut self, message: impl Into<String>) {
        let time = self.get_app_time();
        self.state
            .show_toast(message, time, crate::state::TOAST_DURATION);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Frame Layout
    // ─────────────────────────────────────────────────────────────────────────

    /// Render the main UI and collect the actions it produced.
    fn render_ui(&mut self, ctx: &egui::Context) -> Vec<AppAction> {
        let mut actions = Vec::new();

        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                self.file_menu(ui, &mut actions);
                self.view_menu(ui, &mut actions);
                ui.menu_button("Help", |ui| {
                    if ui.button("About\u{2026}").clicked() {
                        actions.push(AppAction::ToggleAbout);
                        ui.close_menu();
                    }
                });
            });
        });

        egui::TopBottomPanel::top("toolbar")
            .exact_height(self.toolbar.height())
            .show(ctx, |ui| {
                let can_edit = self.state.settings.show_editor;
                if let Some(action) = self.toolbar.show(ui, &self.state.templates, can_edit) {
                    actions.push(action);
                }
            });

        self.render_status_bar(ctx);

        if self.state.settings.show_project_panel {
            let panel = ProjectPanel::new(
                self.state.settings.project_directory.as_deref(),
                &self.state.project_files,
            )
            .current(self.state.document.path.as_deref());
            if let Some(action) = panel.show(ctx) {
                actions.push(action);
            }
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            let show_editor = self.state.settings.show_editor;
            let show_preview = self.state.settings.show_preview;

            match (show_editor, show_preview) {
                (true, true) => self.render_split(ui),
                (true, false) => self.render_editor(ui),
                (false, true) => self.render_preview(ui),
                (false, false) => {
                    ui.centered_and_justified(|ui| {
                        ui.label(
                            egui::RichText::new(
                                "Editor and preview are hidden. Use the View menu to show them.",
                            )
                            .weak(),
                        );
                    });
                }
            }
        });

        actions
    }

    fn file_menu(&self, ui: &mut egui::Ui, actions: &mut Vec<AppAction>) {
        ui.menu_button("File", |ui| {
            menu_item(ui, "New Article", "Ctrl+N", AppAction::New, actions);
            menu_item(
                ui,
                "New from Template\u{2026}",
                "Alt+N",
                AppAction::ChooseTemplate,
                actions,
            );
            ui.separator();
            menu_item(ui, "Open Project\u{2026}", "", AppAction::OpenProject, actions);
            menu_item(ui, "Open File\u{2026}", "Ctrl+O", AppAction::Open, actions);

            ui.menu_button("Recent Files", |ui| {
                if self.state.settings.recent_files.is_empty() {
                    ui.label(egui::RichText::new("No recent files").weak());
                }
                for path in &self.state.settings.recent_files {
                    let label = path
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_else(|| path.display().to_string());
                    if ui
                        .button(label)
                        .on_hover_text(path.display().to_string())
                        .clicked()
                    {
                        actions.push(AppAction::OpenPath(path.clone()));
                        ui.close_menu();
                    }
                }
            });

            ui.separator();
            menu_item(ui, "Save", "Ctrl+S", AppAction::Save, actions);
            menu_item(ui, "Save As\u{2026}", "Ctrl+Shift+S", AppAction::SaveAs, actions);
            ui.separator();
            menu_item(ui, "Export HTML\u{2026}", "", AppAction::ExportHtml, actions);
            menu_item(ui, "Copy as HTML", "", AppAction::CopyAsHtml, actions);
            ui.separator();
            menu_item(ui, "Exit", "Ctrl+Q", AppAction::Exit, actions);
        });
    }

    fn view_menu(&self, ui: &mut egui::Ui, actions: &mut Vec<AppAction>) {
        let settings = &self.state.settings;
        ui.menu_button("View", |ui| {
            let toggles = [
                ("Editor", settings.show_editor, AppAction::ToggleEditor),
                ("Preview", settings.show_preview, AppAction::TogglePreview),
                (
                    "Project Panel",
                    settings.show_project_panel,
                    AppAction::ToggleProjectPanel,
                ),
                ("Word Wrap", settings.word_wrap, AppAction::ToggleWordWrap),
                (
                    "Open Exported HTML",
                    settings.open_after_export,
                    AppAction::ToggleOpenAfterExport,
                ),
            ];
            for (label, checked, action) in toggles {
                let mark = if checked { "\u{2714} " } else { "    " };
                if ui.button(format!("{}{}", mark, label)).clicked() {
                    actions.push(action);
                    ui.close_menu();
                }
            }

            ui.separator();
            ui.horizontal(|ui| {
                ui.label(format!("Font size: {:.0}", settings.font_size));
                if ui.small_button("\u{2212}").on_hover_text("Ctrl+-").clicked() {
                    actions.push(AppAction::ZoomBy(-1.0));
                }
                if ui.small_button("+").on_hover_text("Ctrl++").clicked() {
                    actions.push(AppAction::ZoomBy(1.0));
                }
            });
        });
    }

    /// Editor and preview side by side, divided at `split_ratio`.
    fn render_split(&mut self, ui: &mut egui::Ui) {
        let total = ui.available_width();
        let response = egui::SidePanel::left("editor_pane")
            .resizable(true)
            .default_width(total * self.state.settings.split_ratio)
            .width_range(total * Settings::MIN_SPLIT_RATIO..=total * Settings::MAX_SPLIT_RATIO)
            .show_inside(ui, |ui| self.render_editor(ui));

        if total > 0.0 {
            let ratio = response.response.rect.width() / total;
            if (ratio - self.state.settings.split_ratio).abs() > 0.01 {
                self.state.update_settings(|s| {
                    s.split_ratio =
                        ratio.clamp(Settings::MIN_SPLIT_RATIO, Settings::MAX_SPLIT_RATIO)
                });
            }
        }

        egui::CentralPanel::default().show_inside(ui, |ui| self.render_preview(ui));
    }

    fn render_editor(&mut self, ui: &mut egui::Ui) {
        let font_size = self.state.settings.font_size;
        let word_wrap = self.state.settings.word_wrap;

        let output = EditorWidget::new(&mut self.state.document)
            .font_size(font_size)
            .word_wrap(word_wrap)
            .id(egui::Id::new("article_editor"))
            .show(ui);

        if output.changed {
            self.state.refresh_preview();
        }
    }

    fn render_preview(&self, ui: &mut egui::Ui) {
        PreviewView::new(&self.state.preview_blocks)
            .font_size(self.state.settings.font_size)
            .show(ui);
    }

    fn render_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let doc = &self.state.document;
                let location = doc
                    .path
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "Untitled".to_string());
                ui.label(egui::RichText::new(location).small());
                if doc.is_modified() {
                    ui.label(egui::RichText::new("\u{25CF} modified").small().weak());
                }

                if let Some(message) = &self.state.ui.toast_message {
                    ui.separator();
                    ui.label(egui::RichText::new(message).small().strong());
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let (line, col) = char_index_to_line_col(&doc.content, doc.cursor);
                    ui.label(
                        egui::RichText::new(format!(
                            "Ln {}, Col {}  |  {} chars",
                            line + 1,
                            col + 1,
                            doc.content.chars().count()
                        ))
                        .small(),
                    );
                });
            });
        });
    }

    /// Confirmation dialog, About window, template picker.
    fn render_dialogs(&mut self, ctx: &egui::Context) -> Vec<AppAction> {
        let mut actions = Vec::new();

        if self.state.ui.show_confirm_dialog {
            egui::Window::new("Unsaved Changes")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.label(&self.state.ui.confirm_dialog_message);
                    ui.separator();
                    ui.horizontal(|ui| {
                        if ui.button("Save").clicked() {
                            self.handle_save_file();
                            if !self.state.document.is_modified() {
                                self.confirm_pending();
                            }
                        }
                        if ui.button("Discard").clicked() {
                            self.confirm_pending();
                        }
                        if ui.button("Cancel").clicked() {
                            self.state.cancel_pending_action();
                        }
                    });
                });
        }

        if self.state.ui.show_about && self.about_panel.show(ctx) {
            self.state.ui.show_about = false;
        }

        if self.state.ui.show_template_picker {
            let mut open = true;
            egui::Window::new("New from Template")
                .collapsible(false)
                .resizable(false)
                .open(&mut open)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    if self.state.templates.is_empty() {
                        ui.label("No templates found in the project's \"templates\" folder.");
                        if ui.button("Open Project\u{2026}").clicked() {
                            actions.push(AppAction::OpenProject);
                        }
                        return;
                    }
                    for template in &self.state.templates {
                        if ui.button(template.label()).clicked() {
                            actions.push(AppAction::NewFromTemplate(template.path.clone()));
                        }
                    }
                });
            if !open || !actions.is_empty() {
                self.state.ui.show_template_picker = false;
            }
        }

        actions
    }

    fn confirm_pending(&mut self) {
        if self.state.handle_confirmed_action() == Some(PendingAction::Exit) {
            self.should_exit = true;
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Input
    // ─────────────────────────────────────────────────────────────────────────

    fn collect_shortcuts(&self, ctx: &egui::Context) -> Vec<AppAction> {
        ctx.input(|i| {
            i.events
                .iter()
                .filter_map(|event| match event {
                    egui::Event::Key {
                        key,
                        pressed: true,
                        modifiers,
                        ..
                    } => shortcut_action(*modifiers, *key),
                    _ => None,
                })
                .collect()
        })
    }

    /// Turn dropped paths into actions: a folder becomes the project, a
    /// Markdown file is opened.
    fn collect_dropped_files(&mut self, ctx: &egui::Context) -> Vec<AppAction> {
        let dropped: Vec<PathBuf> = ctx.input(|i| {
            i.raw
                .dropped_files
                .iter()
                .filter_map(|f| f.path.clone())
                .collect()
        });

        if dropped.is_empty() {
            return Vec::new();
        }

        if let Some(folder) = dropped.iter().find(|p| p.is_dir()) {
            info!("Dropped folder: {}", folder.display());
            return vec![AppAction::SetProject(folder.clone())];
        }

        match dropped.into_iter().find(|p| is_markdown_file(p)) {
            Some(file) => {
                info!("Dropped file: {}", file.display());
                vec![AppAction::OpenPath(file)]
            }
            None => {
                self.toast("Only Markdown files can be opened");
                Vec::new()
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Action Dispatch
    // ─────────────────────────────────────────────────────────────────────────

    fn handle_action(&mut self, action: AppAction) {
        debug!("Handling action: {:?}", action);
        match action {
            AppAction::New => {
                self.state.request_new_document();
            }
            AppAction::ChooseTemplate => {
                self.state.refresh_project();
                self.state.ui.show_template_picker = true;
            }
            AppAction::NewFromTemplate(path) => {
                self.state.request_template(path);
            }
            AppAction::Open => self.handle_open_file(),
            AppAction::OpenPath(path) => {
                self.state.request_open(path);
            }
            AppAction::OpenProject => self.handle_open_project(),
            AppAction::SetProject(dir) => self.handle_set_project(dir),
            AppAction::RefreshProject => self.state.refresh_project(),
            AppAction::Save => self.handle_save_file(),
            AppAction::SaveAs => self.handle_save_as_file(),
            AppAction::Exit => {
                if self.state.request_exit() {
                    self.should_exit = true;
                }
            }
            AppAction::Format(command) => {
                self.state.apply_format(command);
            }
            AppAction::InsertImage => self.handle_insert_image(),
            AppAction::ExportHtml => self.handle_export_html(),
            AppAction::CopyAsHtml => self.handle_copy_as_html(),
            AppAction::ToggleEditor => {
                self.state.update_settings(|s| s.show_editor = !s.show_editor)
            }
            AppAction::TogglePreview => {
                self.state.update_settings(|s| s.show_preview = !s.show_preview)
            }
            AppAction::ToggleProjectPanel => self
                .state
                .update_settings(|s| s.show_project_panel = !s.show_project_panel),
            AppAction::ToggleWordWrap => self.state.update_settings(|s| s.word_wrap = !s.word_wrap),
            AppAction::ToggleOpenAfterExport => self
                .state
                .update_settings(|s| s.open_after_export = !s.open_after_export),
            AppAction::ZoomBy(delta) => self.state.update_settings(|s| {
                s.font_size =
                    (s.font_size + delta).clamp(Settings::MIN_FONT_SIZE, Settings::MAX_FONT_SIZE)
            }),
            AppAction::ToggleAbout => self.state.toggle_about(),
        }
    }

    /// Handle the "File > Open" action.
    fn handle_open_file(&mut self) {
        let initial_dir = self.state.settings.dialog_directory().cloned();
        match open_markdown_dialog(initial_dir.as_ref()) {
            Some(path) => {
                info!("Opening file: {}", path.display());
                self.state.request_open(path);
            }
            None => debug!("File dialog cancelled"),
        }
    }

    /// Handle the "File > Save" action.
    ///
    /// Falls back to Save As when the document has no path.
    fn handle_save_file(&mut self) {
        match self.state.save() {
            Ok(true) => {
                let shown = self
                    .state
                    .document
                    .path
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default();
                self.toast(format!("Saved: {}", shown));
            }
            Ok(false) => self.handle_save_as_file(),
            Err(e) => {
                warn!("Failed to save file: {}", e);
                self.toast(format!("Save failed: {}", e));
            }
        }
    }

    /// Handle the "File > Save As" action.
    fn handle_save_as_file(&mut self) {
        let initial_dir = self
            .state
            .document
            .directory()
            .map(|p| p.to_path_buf())
            .or_else(|| self.state.settings.dialog_directory().cloned());

        let default_name = self
            .state
            .document
            .path
            .as_ref()
            .and_then(|p| p.file_name())
            .and_then(|n| n.to_str())
            .unwrap_or("plant.md")
            .to_string();

        let Some(path) = save_markdown_dialog(initial_dir.as_ref(), Some(&default_name)) else {
            debug!("Save dialog cancelled");
            return;
        };

        match self.state.save_as(path.clone()) {
            Ok(()) => self.toast(format!("Saved: {}", path.display())),
            Err(e) => {
                warn!("Failed to save file: {}", e);
                self.toast(format!("Save failed: {}", e));
            }
        }
    }

    fn handle_open_project(&mut self) {
        let initial_dir = self
            .state
            .settings
            .project_directory
            .clone()
            .or_else(|| self.state.settings.dialog_directory().cloned());

        if let Some(dir) = pick_project_dialog(initial_dir.as_ref()) {
            self.handle_set_project(dir);
        }
    }

    fn handle_set_project(&mut self, dir: PathBuf) {
        match self.state.set_project_dir(dir.clone()) {
            Ok(()) => {
                let name = dir
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| dir.display().to_string());
                let count = self.state.project_files.len();
                self.toast(format!("Project {}: {} article(s)", name, count));
            }
            Err(e) => {
                warn!("Failed to open project: {}", e);
                self.toast(format!("Could not open project: {}", e));
            }
        }
    }

    fn handle_insert_image(&mut self) {
        let initial_dir = self
            .state
            .settings
            .project_directory
            .clone()
            .or_else(|| self.state.settings.dialog_directory().cloned());

        let Some(image) = pick_image_dialog(initial_dir.as_ref()) else {
            return;
        };

        if !self.state.insert_image(&image) {
            warn!("Image outside the project: {}", image.display());
            let message = if self.state.settings.project_directory.is_some() {
                "Image is outside the project folder; inserted its absolute path"
            } else {
                "No project open; inserted the image's absolute path"
            };
            self.toast(message);
        }
    }

    fn handle_export_html(&mut self) {
        let doc = &self.state.document;
        let initial_dir = doc
            .directory()
            .map(|p| p.to_path_buf())
            .or_else(|| self.state.settings.dialog_directory().cloned());
        let stem = doc
            .path
            .as_ref()
            .and_then(|p| p.file_stem())
            .and_then(|s| s.to_str())
            .map(str::to_string);
        let default_name = format!("{}.html", stem.as_deref().unwrap_or("article"));

        let Some(path) = save_html_dialog(initial_dir.as_ref(), &default_name) else {
            return;
        };

        match export_to_html_file(&self.state.document.content, stem.as_deref(), &path) {
            Ok(()) => {
                self.toast(format!("Exported to {}", path.display()));
                if self.state.settings.open_after_export {
                    if let Err(e) = open::that(&path) {
                        warn!("Failed to open exported file: {}", e);
                    }
                }
            }
            Err(e) => {
                warn!("Failed to export HTML: {}", e);
                self.toast(format!("Export failed: {}", e));
            }
        }
    }

    fn handle_copy_as_html(&mut self) {
        match copy_html_to_clipboard(&self.state.document.content) {
            Ok(()) => {
                info!("Copied HTML to clipboard");
                self.toast("HTML copied to clipboard");
            }
            Err(e) => {
                warn!("Failed to copy HTML to clipboard: {}", e);
                self.toast(format!("Copy failed: {}", e));
            }
        }
    }
}

/// A menu entry with its shortcut shown on the right.
fn menu_item(
    ui: &mut egui::Ui,
    label: &str,
    shortcut: &str,
    action: AppAction,
    actions: &mut Vec<AppAction>,
) {
    if ui
        .add(egui::Button::new(label).shortcut_text(shortcut))
        .clicked()
    {
        actions.push(action);
        ui.close_menu();
    }
}

impl eframe::App for PlantbookApp {
    /// Called each time the UI needs repainting.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Update toast message (clear if expired)
        let current_time = self.get_app_time();
        self.state.update_toast(current_time);
        if self.state.ui.toast_message.is_some() {
            ctx.request_repaint_after(std::time::Duration::from_millis(250));
        }

        let title = self.window_title();
        if title != self.last_title {
            ctx.send_viewport_cmd(egui::ViewportCommand::Title(title.clone()));
            self.last_title = title;
        }

        self.update_window_state(ctx);

        if ctx.input(|i| i.viewport().close_requested()) && !self.handle_close_request() {
            // Cancel the close request - we need to show a confirmation dialog
            ctx.send_viewport_cmd(egui::ViewportCommand::CancelClose);
        }

        let mut actions = self.collect_dropped_files(ctx);

        // Render first so the editor selection is current when actions run
        actions.extend(self.render_ui(ctx));
        actions.extend(self.render_dialogs(ctx));
        actions.extend(self.collect_shortcuts(ctx));

        for action in actions {
            self.handle_action(action);
        }

        if self.should_exit {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    }

    /// Called when the application is about to close.
    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        info!("Application exiting");
        self.state.shutdown();
    }

    /// Save persistent state.
    fn save(&mut self, _storage: &mut dyn eframe::Storage) {
        debug!("Saving application state");
        self.state.save_settings_if_dirty();
    }

    /// Auto-save interval in seconds.
    fn auto_save_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs(30)
    }
}
