//! egui rendering of preview blocks

use super::model::{LineKind, PreviewBlock, Run, RunStyle};
use crate::markdown::highlight::{StyleKind, STYLES};
use egui::{self, RichText, ScrollArea, Ui};

/// Heading sizes relative to the body font, level 1 first.
const HEADING_SCALE: [f32; 6] = [1.8, 1.5, 1.3, 1.15, 1.05, 1.0];

/// Read-only view of the rendered article.
///
/// # Example
///
/// ```ignore
/// PreviewView::new(&state.preview_blocks)
///     .font_size(settings.font_size)
///     .show(ui);
/// ```
pub struct PreviewView<'a> {
    blocks: &'a [PreviewBlock],
    font_size: f32,
}

impl<'a> PreviewView<'a> {
    pub fn new(blocks: &'a [PreviewBlock]) -> Self {
        Self {
            blocks,
            font_size: 14.0,
        }
    }

    /// Set the body font size.
    #[must_use]
    pub fn font_size(mut self, size: f32) -> Self {
        self.font_size = size;
        self
    }

    pub fn show(self, ui: &mut Ui) {
        ScrollArea::vertical()
            .id_source("preview_scroll")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.spacing_mut().item_spacing.y = self.font_size * 0.3;
                for (index, block) in self.blocks.iter().enumerate() {
                    self.show_block(ui, index, block);
                }
            });
    }

    fn show_block(&self, ui: &mut Ui, index: usize, block: &PreviewBlock) {
        match block {
            PreviewBlock::Line { kind, runs } => self.show_line(ui, *kind, runs),
            PreviewBlock::Code(code) => {
                egui::Frame::group(ui.style())
                    .fill(ui.visuals().extreme_bg_color)
                    .show(ui, |ui| {
                        ui.set_width(ui.available_width());
                        ui.label(
                            RichText::new(code)
                                .monospace()
                                .size(self.font_size * 0.95)
                                .color(STYLES.get(StyleKind::Code).color),
                        );
                    });
            }
            PreviewBlock::Table(rows) => {
                egui::Grid::new(("preview_table", index))
                    .striped(true)
                    .spacing([12.0, 4.0])
                    .show(ui, |ui| {
                        for row in rows {
                            for cell in row {
                                ui.horizontal_wrapped(|ui| {
                                    self.show_runs(ui, cell, self.font_size, false);
                                });
                            }
                            ui.end_row();
                        }
                    });
            }
        }
    }

    fn show_line(&self, ui: &mut Ui, kind: LineKind, runs: &[Run]) {
        if runs.is_empty() && kind == LineKind::Paragraph {
            ui.add_space(self.font_size * 0.5);
            return;
        }

        ui.horizontal_wrapped(|ui| {
            ui.spacing_mut().item_spacing.x = 0.0;
            match kind {
                LineKind::Paragraph => self.show_runs(ui, runs, self.font_size, false),
                LineKind::Heading(level) => {
                    let scale = HEADING_SCALE[(level.clamp(1, 6) - 1) as usize];
                    self.show_runs(ui, runs, self.font_size * scale, true);
                }
                LineKind::Bullet => {
                    ui.label(RichText::new("  \u{2022}  ").size(self.font_size));
                    self.show_runs(ui, runs, self.font_size, false);
                }
                LineKind::Numbered(n) => {
                    ui.label(RichText::new(format!("  {}.  ", n)).size(self.font_size));
                    self.show_runs(ui, runs, self.font_size, false);
                }
                LineKind::Quote => {
                    ui.label(
                        RichText::new("\u{258E} ")
                            .size(self.font_size)
                            .color(ui.visuals().weak_text_color()),
                    );
                    self.show_runs(ui, runs, self.font_size, false);
                }
            }
        });
    }

    fn show_runs(&self, ui: &mut Ui, runs: &[Run], size: f32, heading: bool) {
        for run in runs {
            match run {
                Run::Text { text, style } => {
                    ui.label(styled(text, *style, size, heading));
                }
                Run::Link { text, url } => {
                    let label = RichText::new(text)
                        .size(size)
                        .color(STYLES.get(StyleKind::Link).color);
                    ui.hyperlink_to(label, url);
                }
                Run::Image { alt, src } => {
                    let label = if alt.is_empty() { src } else { alt };
                    ui.label(
                        RichText::new(format!("\u{1F5BC} {}", label))
                            .size(size)
                            .italics()
                            .weak(),
                    )
                    .on_hover_text(src.as_str());
                }
            }
        }
    }
}

fn styled(text: &str, style: RunStyle, size: f32, heading: bool) -> RichText {
    let mut rich = RichText::new(text).size(size);
    if heading {
        rich = rich.strong().color(STYLES.get(StyleKind::Header).color);
    }
    if style.bold {
        rich = rich.strong();
    }
    if style.italic {
        rich = rich.italics();
    }
    if style.strike {
        rich = rich.strikethrough();
    }
    if style.code {
        rich = rich.code().color(STYLES.get(StyleKind::Code).color);
    }
    rich
}
