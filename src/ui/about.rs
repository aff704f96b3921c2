//! About/Help window for Plantbook
//!
//! Shows what the application is for and the keyboard shortcuts, in two
//! sections selected from the left column.

use eframe::egui::{self, RichText, ScrollArea, Ui};

/// Keyboard shortcut category for organized display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ShortcutCategory {
    File,
    Formatting,
    View,
}

impl ShortcutCategory {
    const ALL: [ShortcutCategory; 3] = [Self::File, Self::Formatting, Self::View];

    fn label(&self) -> &'static str {
        match self {
            Self::File => "File",
            Self::Formatting => "Formatting",
            Self::View => "View",
        }
    }

    fn shortcuts(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::File => &[
                ("Ctrl+N", "New Article"),
                ("Alt+N", "New from Template"),
                ("Ctrl+O", "Open File"),
                ("Ctrl+S", "Save"),
                ("Ctrl+Shift+S", "Save As"),
                ("Ctrl+Q", "Exit"),
            ],
            Self::Formatting => &[("Ctrl+B", "Bold"), ("Ctrl+I", "Italic")],
            Self::View => &[
                ("Ctrl++", "Larger Font"),
                ("Ctrl+-", "Smaller Font"),
                ("F1", "About / Help"),
            ],
        }
    }
}

/// About panel sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum AboutSection {
    #[default]
    About,
    Shortcuts,
}

impl AboutSection {
    fn label(&self) -> &'static str {
        match self {
            Self::About => "About",
            Self::Shortcuts => "Shortcuts",
        }
    }
}

/// About/Help window state.
#[derive(Debug, Clone, Default)]
pub struct AboutPanel {
    active_section: AboutSection,
}

impl AboutPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show the window. Returns `true` when the user asked to close it.
    pub fn show(&mut self, ctx: &egui::Context) -> bool {
        let mut close_requested = false;

        egui::Window::new("About Plantbook")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .min_width(420.0)
            .show(ctx, |ui| {
                if ui.input(|i| i.key_pressed(egui::Key::Escape)) {
                    close_requested = true;
                }

                ui.horizontal(|ui| {
                    ui.vertical(|ui| {
                        ui.set_min_width(90.0);
                        for section in [AboutSection::About, AboutSection::Shortcuts] {
                            let selected = self.active_section == section;
                            if ui.selectable_label(selected, section.label()).clicked() {
                                self.active_section = section;
                            }
                        }
                    });

                    ui.separator();

                    ui.vertical(|ui| {
                        ui.set_min_width(300.0);
                        ui.set_min_height(220.0);
                        match self.active_section {
                            AboutSection::About => show_about_section(ui),
                            AboutSection::Shortcuts => show_shortcuts_section(ui),
                        }
                    });
                });

                ui.separator();
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Close").clicked() {
                        close_requested = true;
                    }
                });
            });

        close_requested
    }
}

fn show_about_section(ui: &mut Ui) {
    ui.vertical_centered(|ui| {
        ui.add_space(8.0);
        ui.heading(RichText::new("Plantbook").size(22.0).strong());
        ui.label(
            RichText::new(format!("Version {}", env!("CARGO_PKG_VERSION")))
                .size(13.0)
                .weak(),
        );
        ui.add_space(12.0);
        ui.label("Editor and viewer for a houseplant care handbook.");
        ui.add_space(8.0);
        ui.label(
            RichText::new("Articles are plain Markdown files with a live preview.")
                .weak(),
        );
    });
}

fn show_shortcuts_section(ui: &mut Ui) {
    ScrollArea::vertical().show(ui, |ui| {
        for category in ShortcutCategory::ALL {
            ui.label(RichText::new(category.label()).strong());
            egui::Grid::new(("shortcuts", category.label()))
                .num_columns(2)
                .spacing([24.0, 4.0])
                .show(ui, |ui| {
                    for (keys, action) in category.shortcuts() {
                        ui.label(RichText::new(*keys).monospace());
                        ui.label(*action);
                        ui.end_row();
                    }
                });
            ui.add_space(8.0);
        }
    });
}
