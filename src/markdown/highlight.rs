//! Per-line Markdown highlighting for the raw editor
//!
//! Each line ("block") is scanned by a fixed list of rules. Every rule scans
//! the whole line on its own and emits a span for each match, so spans from
//! different rules may overlap. When they do, the span applied last wins.
//!
//! The module also owns the six immutable style records and the conversion
//! of a whole editor buffer into an egui `LayoutJob`.

use egui::text::LayoutJob;
use egui::{Color32, FontFamily, FontId, Stroke, TextFormat};
use regex::Regex;
use std::ops::Range;
use std::sync::OnceLock;

// ─────────────────────────────────────────────────────────────────────────────
// Style Table
// ─────────────────────────────────────────────────────────────────────────────

/// The six kinds of emphasis the highlighter assigns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleKind {
    Header,
    Bold,
    Italic,
    Code,
    List,
    Link,
}

/// Visual attributes of one style.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HighlightStyle {
    pub color: Color32,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    /// Use the monospace family instead of the editor font.
    pub monospace: bool,
}

impl HighlightStyle {
    const fn colored(color: Color32) -> Self {
        Self {
            color,
            bold: false,
            italic: false,
            underline: false,
            monospace: false,
        }
    }
}

/// The fixed style records, one per [`StyleKind`].
pub struct HighlightStyles {
    pub header: HighlightStyle,
    pub bold: HighlightStyle,
    pub italic: HighlightStyle,
    pub code: HighlightStyle,
    pub list: HighlightStyle,
    pub link: HighlightStyle,
}

impl HighlightStyles {
    /// Look up the record for a style kind.
    pub fn get(&self, kind: StyleKind) -> &HighlightStyle {
        match kind {
            StyleKind::Header => &self.header,
            StyleKind::Bold => &self.bold,
            StyleKind::Italic => &self.italic,
            StyleKind::Code => &self.code,
            StyleKind::List => &self.list,
            StyleKind::Link => &self.link,
        }
    }
}

/// Process-wide style table, never mutated.
pub static STYLES: HighlightStyles = HighlightStyles {
    header: HighlightStyle {
        bold: true,
        ..HighlightStyle::colored(Color32::from_rgb(0, 0, 255))
    },
    bold: HighlightStyle {
        bold: true,
        ..HighlightStyle::colored(Color32::from_rgb(0, 0, 0))
    },
    italic: HighlightStyle {
        italic: true,
        ..HighlightStyle::colored(Color32::from_rgb(128, 128, 128))
    },
    code: HighlightStyle {
        monospace: true,
        ..HighlightStyle::colored(Color32::from_rgb(0, 128, 0))
    },
    list: HighlightStyle::colored(Color32::from_rgb(128, 0, 128)),
    link: HighlightStyle {
        underline: true,
        ..HighlightStyle::colored(Color32::from_rgb(0, 128, 128))
    },
};

// ─────────────────────────────────────────────────────────────────────────────
// Spans
// ─────────────────────────────────────────────────────────────────────────────

/// A styled sub-range of a line, in byte offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub len: usize,
    pub style: StyleKind,
}

impl Span {
    fn range(&self) -> Range<usize> {
        self.start..self.start + self.len
    }
}

/// A scanning rule: pattern, style, and whether only the first match counts.
struct Rule {
    pattern: Regex,
    style: StyleKind,
    first_only: bool,
}

fn rule(pattern: &str, style: StyleKind, first_only: bool) -> Rule {
    Rule {
        pattern: Regex::new(pattern).expect("highlight rule patterns are constant and valid"),
        style,
        first_only,
    }
}

static RULES: OnceLock<Vec<Rule>> = OnceLock::new();

/// Rules in application order; later rules overwrite earlier ones.
fn rules() -> &'static [Rule] {
    RULES.get_or_init(|| {
        vec![
            rule(r"^#{1,6} ", StyleKind::Header, true),
            rule(r"\*\*[^*]+\*\*", StyleKind::Bold, false),
            rule(r"\*[^*]+\*", StyleKind::Italic, false),
            rule(r"`[^`]+`", StyleKind::Code, false),
            rule(r"```[^`]*```", StyleKind::Code, false),
            rule(r"^-\s", StyleKind::List, false),
            rule(r"^\d+\.\s", StyleKind::List, false),
            rule(r"\[.*\]\(.*\)", StyleKind::Link, false),
        ]
    })
}

/// Compute the spans for one line, in the order they are applied.
pub fn highlight_line(line: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    for rule in rules() {
        for m in rule.pattern.find_iter(line) {
            spans.push(Span {
                start: m.start(),
                len: m.len(),
                style: rule.style,
            });
            if rule.first_only {
                break;
            }
        }
    }
    spans
}

/// Split a line into contiguous segments, each carrying the style of the
/// last span that covers it (or `None` for plain text).
pub fn resolve_segments(line: &str, spans: &[Span]) -> Vec<(Range<usize>, Option<StyleKind>)> {
    // One slot per byte; spans always start and end on char boundaries
    let mut slots: Vec<Option<StyleKind>> = vec![None; line.len()];
    for span in spans {
        let range = span.range();
        let end = range.end.min(line.len());
        for slot in &mut slots[range.start.min(end)..end] {
            *slot = Some(span.style);
        }
    }

    let mut segments = Vec::new();
    let mut start = 0;
    for i in 1..=slots.len() {
        if i == slots.len() || slots[i] != slots[start] {
            segments.push((start..i, slots[start]));
            start = i;
        }
    }
    segments
}

// ─────────────────────────────────────────────────────────────────────────────
// egui Integration
// ─────────────────────────────────────────────────────────────────────────────

/// Build a highlighted `LayoutJob` for the whole editor buffer.
///
/// Lines are highlighted one at a time; the newline that ends a line is laid
/// out with the plain format.
pub fn layout_job(
    text: &str,
    font_size: f32,
    wrap_width: f32,
    base_color: Color32,
) -> LayoutJob {
    let mut job = LayoutJob::default();
    job.wrap.max_width = wrap_width;

    let plain = TextFormat {
        font_id: FontId::new(font_size, FontFamily::Proportional),
        color: base_color,
        ..Default::default()
    };

    for line in text.split_inclusive('\n') {
        let body = line.strip_suffix('\n').unwrap_or(line);
        let spans = highlight_line(body);
        for (range, style) in resolve_segments(body, &spans) {
            let format = match style {
                Some(kind) => text_format(STYLES.get(kind), font_size),
                None => plain.clone(),
            };
            job.append(&body[range], 0.0, format);
        }
        if body.len() < line.len() {
            job.append("\n", 0.0, plain.clone());
        }
    }

    job
}

fn text_format(style: &HighlightStyle, font_size: f32) -> TextFormat {
    let family = if style.monospace {
        FontFamily::Monospace
    } else {
        FontFamily::Proportional
    };
    TextFormat {
        font_id: FontId::new(font_size, family),
        color: style.color,
        italics: style.italic,
        underline: if style.underline {
            Stroke::new(1.0, style.color)
        } else {
            Stroke::NONE
        },
        // egui's bundled fonts have no bold face; bold styles rely on colour
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(start: usize, len: usize, style: StyleKind) -> Span {
        Span { start, len, style }
    }

    #[test]
    fn test_header_prefix_only() {
        let spans = highlight_line("## Watering");
        assert_eq!(spans, vec![span(0, 3, StyleKind::Header)]);
    }

    #[test]
    fn test_header_needs_space_and_max_six() {
        assert!(highlight_line("#tag").is_empty());
        assert!(highlight_line("####### x").is_empty());
    }

    #[test]
    fn test_bold_is_also_matched_by_italic_rule() {
        let spans = highlight_line("**dry**");
        assert_eq!(spans[0], span(0, 7, StyleKind::Bold));
        // The single-asterisk rule re-matches the inner pair of the bold span
        assert!(spans.iter().any(|s| s.style == StyleKind::Italic));
    }

    #[test]
    fn test_italic_all_matches() {
        let spans = highlight_line("*a* and *b*");
        assert_eq!(
            spans,
            vec![span(0, 3, StyleKind::Italic), span(8, 3, StyleKind::Italic)]
        );
    }

    #[test]
    fn test_inline_and_fenced_code() {
        let spans = highlight_line("```x```");
        assert!(spans.contains(&span(0, 7, StyleKind::Code)));
    }

    #[test]
    fn test_list_prefixes() {
        assert_eq!(highlight_line("- soil"), vec![span(0, 2, StyleKind::List)]);
        assert_eq!(
            highlight_line("12. repot"),
            vec![span(0, 4, StyleKind::List)]
        );
        assert!(highlight_line("-soil").is_empty());
    }

    #[test]
    fn test_link_is_greedy() {
        let spans = highlight_line("[a](b) [c](d)");
        assert_eq!(spans, vec![span(0, 13, StyleKind::Link)]);
    }

    #[test]
    fn test_highlight_is_idempotent() {
        let line = "# **Fern** *shade* `pH` [wiki](http://x)";
        assert_eq!(highlight_line(line), highlight_line(line));
    }

    #[test]
    fn test_last_applied_wins() {
        let line = "- [x](y)";
        let spans = highlight_line(line);
        let segments = resolve_segments(line, &spans);
        // The list prefix "- " is followed by a link covering the rest
        assert_eq!(
            segments,
            vec![
                (0..2, Some(StyleKind::List)),
                (2..8, Some(StyleKind::Link)),
            ]
        );

        let overlapping = [span(0, 4, StyleKind::Bold), span(2, 4, StyleKind::Code)];
        let segments = resolve_segments("abcdef", &overlapping);
        assert_eq!(
            segments,
            vec![
                (0..2, Some(StyleKind::Bold)),
                (2..6, Some(StyleKind::Code)),
            ]
        );
    }

    #[test]
    fn test_resolve_plain_line() {
        assert_eq!(
            resolve_segments("plain", &[]),
            vec![(0..5, None)]
        );
        assert!(resolve_segments("", &[]).is_empty());
    }

    #[test]
    fn test_multibyte_offsets() {
        let line = "Полив **раз** в неделю";
        let spans = highlight_line(line);
        let bold = spans[0];
        assert_eq!(&line[bold.start..bold.start + bold.len], "**раз**");
    }

    #[test]
    fn test_style_table() {
        assert!(STYLES.get(StyleKind::Header).bold);
        assert!(STYLES.get(StyleKind::Italic).italic);
        assert!(STYLES.get(StyleKind::Link).underline);
        assert!(STYLES.get(StyleKind::Code).monospace);
        assert_eq!(
            STYLES.get(StyleKind::List).color,
            Color32::from_rgb(128, 0, 128)
        );
    }

    #[test]
    fn test_layout_job_covers_whole_text() {
        let text = "# Fern\n- shade\n\nplain";
        let job = layout_job(text, 14.0, 300.0, Color32::GRAY);
        assert_eq!(job.text, text);
        assert_eq!(job.wrap.max_width, 300.0);
    }
}
