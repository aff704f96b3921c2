//! Toolbar UI Component for Plantbook
//!
//! A single row of file, formatting, and export buttons above the editor.
//! Every control produces an [`AppAction`] that the app dispatches after the
//! frame has been drawn, the same way menu items and shortcuts do.

use crate::files::ProjectFile;
use crate::markdown::FormatCommand;
use eframe::egui::{self, Color32, Key, Modifiers, Response, RichText, Ui, Vec2};
use std::path::PathBuf;

/// Height of the toolbar.
const TOOLBAR_HEIGHT: f32 = 34.0;

/// Size of icon buttons.
const ICON_BUTTON_SIZE: Vec2 = Vec2::new(30.0, 26.0);

const TEXT_COLOR: Color32 = Color32::from_rgb(50, 50, 50);
const HOVER_BG: Color32 = Color32::from_rgb(220, 220, 220);
const SEPARATOR_COLOR: Color32 = Color32::from_rgb(210, 210, 210);
const TOOLBAR_BG: Color32 = Color32::from_rgb(248, 248, 248);

/// Everything a menu item, toolbar button, shortcut or drop can ask for.
#[derive(Debug, Clone, PartialEq)]
pub enum AppAction {
    // File operations
    /// Reset to the plant template
    New,
    /// Show the template picker
    ChooseTemplate,
    /// Start a document from a project template
    NewFromTemplate(PathBuf),
    /// Open file dialog
    Open,
    /// Open a known file (project panel, recent files, drag & drop)
    OpenPath(PathBuf),
    /// Pick the project directory
    OpenProject,
    /// Use a known directory as the project
    SetProject(PathBuf),
    /// Re-scan the project directory
    RefreshProject,
    /// Save current file
    Save,
    /// Save As dialog
    SaveAs,
    /// Quit the application
    Exit,

    // Editing
    /// Apply a formatting command to the selection
    Format(FormatCommand),
    /// Pick an image and insert a reference to it
    InsertImage,

    // Export
    /// Write a standalone HTML document
    ExportHtml,
    /// Copy the rendered HTML to the clipboard
    CopyAsHtml,

    // View
    ToggleEditor,
    TogglePreview,
    ToggleProjectPanel,
    ToggleWordWrap,
    /// Open exported HTML files in the default browser
    ToggleOpenAfterExport,
    /// Change the font size by the given number of points
    ZoomBy(f32),
    ToggleAbout,
}

/// Map a key press to its shortcut action.
///
/// `Ctrl+Shift+S` is checked before `Ctrl+S`.
pub fn shortcut_action(modifiers: Modifiers, key: Key) -> Option<AppAction> {
    if key == Key::F1 && modifiers.is_none() {
        return Some(AppAction::ToggleAbout);
    }
    if modifiers.alt && !modifiers.command {
        return (key == Key::N).then_some(AppAction::ChooseTemplate);
    }
    if !modifiers.command {
        return None;
    }

    let action = match (key, modifiers.shift) {
        (Key::S, true) => AppAction::SaveAs,
        (Key::S, false) => AppAction::Save,
        (Key::N, false) => AppAction::New,
        (Key::O, false) => AppAction::Open,
        (Key::B, false) => AppAction::Format(FormatCommand::Bold),
        (Key::I, false) => AppAction::Format(FormatCommand::Italic),
        (Key::Q, false) => AppAction::Exit,
        (Key::Plus | Key::Equals, _) => AppAction::ZoomBy(1.0),
        (Key::Minus, false) => AppAction::ZoomBy(-1.0),
        _ => return None,
    };
    Some(action)
}

/// Toolbar rendering.
#[derive(Debug, Clone, Default)]
pub struct Toolbar;

impl Toolbar {
    /// Height reserved for the toolbar panel.
    pub fn height(&self) -> f32 {
        TOOLBAR_HEIGHT
    }

    /// Render the toolbar and return any triggered action.
    ///
    /// `templates` fills the "new from template" menu; `can_edit` is false
    /// while the editor pane is hidden.
    pub fn show(
        &self,
        ui: &mut Ui,
        templates: &[ProjectFile],
        can_edit: bool,
    ) -> Option<AppAction> {
        let mut action: Option<AppAction> = None;

        ui.painter()
            .rect_filled(ui.available_rect_before_wrap(), 0.0, TOOLBAR_BG);

        ui.horizontal(|ui| {
            ui.set_height(TOOLBAR_HEIGHT);
            ui.spacing_mut().item_spacing.x = 2.0;

            // File
            if icon_button(ui, "\u{1F4C4}", "New (Ctrl+N)", true).clicked() {
                action = Some(AppAction::New);
            }
            ui.add_enabled_ui(!templates.is_empty(), |ui| {
                ui.menu_button(RichText::new("\u{1F331}").size(15.0), |ui| {
                    for template in templates {
                        if ui.button(template.label()).clicked() {
                            action = Some(AppAction::NewFromTemplate(template.path.clone()));
                            ui.close_menu();
                        }
                    }
                })
                .response
                .on_hover_text("New from Template (Alt+N)")
                .on_disabled_hover_text("No templates in <project>/templates");
            });
            if icon_button(ui, "\u{1F4C2}", "Open File (Ctrl+O)", true).clicked() {
                action = Some(AppAction::Open);
            }
            if icon_button(ui, "\u{1F4BE}", "Save (Ctrl+S)", true).clicked() {
                action = Some(AppAction::Save);
            }

            separator(ui);

            // Inline formatting
            for command in [
                FormatCommand::Bold,
                FormatCommand::Italic,
                FormatCommand::Strikethrough,
                FormatCommand::InlineCode,
            ] {
                let bold = command == FormatCommand::Bold;
                if format_button(ui, &command.label(), &command.tooltip(), can_edit, bold)
                    .clicked()
                {
                    action = Some(AppAction::Format(command));
                }
            }

            separator(ui);

            // Block insertions
            for command in [FormatCommand::InsertHeading, FormatCommand::InsertListItem] {
                if format_button(ui, &command.label(), &command.tooltip(), can_edit, false)
                    .clicked()
                {
                    action = Some(AppAction::Format(command));
                }
            }

            ui.add_enabled_ui(can_edit, |ui| {
                egui::ComboBox::from_id_source("heading_dropdown")
                    .selected_text(RichText::new("H").size(12.0))
                    .width(40.0)
                    .show_ui(ui, |ui| {
                        for level in 1..=6u8 {
                            let command = FormatCommand::Heading(level);
                            if ui.selectable_label(false, command.tooltip()).clicked() {
                                action = Some(AppAction::Format(command));
                            }
                        }
                    });
            });

            let quote = FormatCommand::Blockquote;
            if format_button(ui, &quote.label(), &quote.tooltip(), can_edit, false).clicked() {
                action = Some(AppAction::Format(quote));
            }
            if icon_button(ui, "\u{1F5BC}", "Insert Image", can_edit).clicked() {
                action = Some(AppAction::InsertImage);
            }

            separator(ui);

            // Export
            if icon_button(ui, "\u{1F310}", "Export HTML", true).clicked() {
                action = Some(AppAction::ExportHtml);
            }
            if icon_button(ui, "\u{1F4CB}", "Copy as HTML", true).clicked() {
                action = Some(AppAction::CopyAsHtml);
            }
        });

        action
    }
}

/// Render an icon button with a hover background.
fn icon_button(ui: &mut Ui, icon: &str, tooltip: &str, enabled: bool) -> Response {
    let text_color = if enabled {
        TEXT_COLOR
    } else {
        Color32::from_rgb(160, 160, 160)
    };

    let btn = ui.add_enabled(
        enabled,
        egui::Button::new(RichText::new(icon).size(15.0).color(text_color))
            .frame(false)
            .min_size(ICON_BUTTON_SIZE),
    );

    if btn.hovered() && enabled {
        ui.painter()
            .rect_filled(btn.rect, egui::Rounding::same(3.0), HOVER_BG);
        ui.painter().text(
            btn.rect.center(),
            egui::Align2::CENTER_CENTER,
            icon,
            egui::FontId::proportional(15.0),
            text_color,
        );
    }

    btn.on_hover_text(tooltip)
}

/// Render a compact text button for a formatting command.
fn format_button(ui: &mut Ui, label: &str, tooltip: &str, enabled: bool, bold: bool) -> Response {
    let mut text = RichText::new(label).size(13.0).color(TEXT_COLOR);
    if bold {
        text = text.strong();
    }

    let btn = ui.add_enabled(
        enabled,
        egui::Button::new(text)
            .frame(false)
            .min_size(Vec2::new(26.0, 24.0)),
    );

    if btn.hovered() && enabled {
        ui.painter().rect_stroke(
            btn.rect,
            egui::Rounding::same(3.0),
            egui::Stroke::new(1.0, HOVER_BG),
        );
    }

    btn.on_hover_text(tooltip)
}

fn separator(ui: &mut Ui) {
    ui.add_space(4.0);
    let (rect, _response) =
        ui.allocate_exact_size(Vec2::new(1.0, TOOLBAR_HEIGHT - 10.0), egui::Sense::hover());
    ui.painter().line_segment(
        [rect.center_top(), rect.center_bottom()],
        egui::Stroke::new(1.0, SEPARATOR_COLOR),
    );
    ui.add_space(4.0);
}
