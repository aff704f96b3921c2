//! Preview document model
//!
//! egui has no HTML widget, so the preview reads the renderer's fragment
//! back into a flat list of blocks. The reader is deliberately forgiving:
//! unknown tags are skipped, unmatched closers are ignored and unterminated
//! elements are flushed at the end of input. It never fails.
//!
//! Line structure follows the fragment: every `<br>` ends a line, except the
//! single break that follows a block element (heading, list, quote, code,
//! table), which the renderer leaves behind from the source newline.

use regex::Regex;
use std::sync::OnceLock;

// ─────────────────────────────────────────────────────────────────────────────
// Model Types
// ─────────────────────────────────────────────────────────────────────────────

/// Inline emphasis flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStyle {
    pub bold: bool,
    pub italic: bool,
    pub strike: bool,
    pub code: bool,
}

/// A piece of inline content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Run {
    Text { text: String, style: RunStyle },
    Link { text: String, url: String },
    Image { alt: String, src: String },
}

/// What kind of line a text block is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Paragraph,
    /// Level 1-6
    Heading(u8),
    Bullet,
    /// Displayed number, counting up across adjacent items
    Numbered(usize),
    Quote,
}

/// One rendered block of the preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewBlock {
    /// A single line of inline content; empty runs mean a blank line
    Line { kind: LineKind, runs: Vec<Run> },
    /// Preformatted code
    Code(String),
    /// Rows of cells of inline content
    Table(Vec<Vec<Vec<Run>>>),
}

#[cfg(test)]
impl PreviewBlock {
    /// Text content with all markup dropped.
    pub fn plain_text(&self) -> String {
        match self {
            PreviewBlock::Line { runs, .. } => runs_text(runs),
            PreviewBlock::Code(code) => code.clone(),
            PreviewBlock::Table(rows) => rows
                .iter()
                .map(|row| {
                    row.iter()
                        .map(|cell| runs_text(cell))
                        .collect::<Vec<_>>()
                        .join(" | ")
                })
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

#[cfg(test)]
fn runs_text(runs: &[Run]) -> String {
    runs.iter()
        .map(|run| match run {
            Run::Text { text, .. } | Run::Link { text, .. } => text.as_str(),
            Run::Image { alt, .. } => alt.as_str(),
        })
        .collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Tokenizer
// ─────────────────────────────────────────────────────────────────────────────

static TAG_RE: OnceLock<Regex> = OnceLock::new();
static ATTR_RE: OnceLock<Regex> = OnceLock::new();

fn tag_re() -> &'static Regex {
    TAG_RE.get_or_init(|| {
        Regex::new(r"<(/?)([a-zA-Z][a-zA-Z0-9]*)([^<>]*)>").expect("tag pattern is valid")
    })
}

fn attr_re() -> &'static Regex {
    ATTR_RE.get_or_init(|| Regex::new(r#"(\w+)="([^"]*)""#).expect("attribute pattern is valid"))
}

/// Look up an attribute value in the raw attribute text of a tag.
fn attribute(attrs: &str, name: &str) -> Option<String> {
    attr_re()
        .captures_iter(attrs)
        .find(|caps| caps[1].eq_ignore_ascii_case(name))
        .map(|caps| decode_entities(&caps[2]))
}

/// Decode the entities the renderer produces.
pub fn decode_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

// ─────────────────────────────────────────────────────────────────────────────
// Builder
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Default)]
struct Builder {
    blocks: Vec<PreviewBlock>,

    kind: Option<LineKind>,
    runs: Vec<Run>,
    /// The next `<br>` only closes a block element's line
    absorb_break: bool,
    last_number: Option<usize>,

    bold: usize,
    italic: usize,
    strike: usize,
    code: usize,
    link: Option<(String, String)>,

    pre: Option<String>,
    table: Option<Vec<Vec<Vec<Run>>>>,
    row: Option<Vec<Vec<Run>>>,
    cell: Option<Vec<Run>>,
}

impl Builder {
    fn style(&self) -> RunStyle {
        RunStyle {
            bold: self.bold > 0,
            italic: self.italic > 0,
            strike: self.strike > 0,
            code: self.code > 0,
        }
    }

    fn push_run(&mut self, run: Run) {
        match self.cell.as_mut() {
            Some(cell) => cell.push(run),
            None => self.runs.push(run),
        }
    }

    fn text(&mut self, raw: &str) {
        if raw.is_empty() {
            return;
        }
        let text = decode_entities(raw);
        self.absorb_break = false;

        if let Some(pre) = self.pre.as_mut() {
            pre.push_str(&text);
        } else if let Some((_, link_text)) = self.link.as_mut() {
            link_text.push_str(&text);
        } else {
            let style = self.style();
            self.push_run(Run::Text { text, style });
        }
    }

    /// Emit a finished block, keeping the numbered-list counter in step.
    fn emit(&mut self, block: PreviewBlock) {
        if !matches!(
            block,
            PreviewBlock::Line {
                kind: LineKind::Numbered(_),
                ..
            }
        ) {
            self.last_number = None;
        }
        self.blocks.push(block);
    }

    /// Close the current line, even when it is empty.
    fn end_line(&mut self) {
        let kind = self.kind.take().unwrap_or(LineKind::Paragraph);
        let runs = std::mem::take(&mut self.runs);
        self.emit(PreviewBlock::Line { kind, runs });
    }

    /// Close the current line only if something is in it.
    fn flush_line(&mut self) {
        if self.kind.is_some() || !self.runs.is_empty() {
            self.end_line();
        }
    }

    fn start_line(&mut self, kind: LineKind) {
        self.flush_line();
        let kind = match kind {
            LineKind::Numbered(_) => {
                let n = self.last_number.map(|n| n + 1).unwrap_or(1);
                self.last_number = Some(n);
                LineKind::Numbered(n)
            }
            other => other,
        };
        self.kind = Some(kind);
        self.absorb_break = false;
    }

    fn end_block_line(&mut self) {
        if self.kind.is_some() {
            self.end_line();
            self.absorb_break = true;
        }
    }

    fn line_break(&mut self) {
        if let Some(pre) = self.pre.as_mut() {
            pre.push('\n');
        } else if let Some(cell) = self.cell.as_mut() {
            cell.push(Run::Text {
                text: " ".to_string(),
                style: RunStyle::default(),
            });
        } else if self.absorb_break {
            self.absorb_break = false;
        } else {
            self.end_line();
        }
    }

    fn open_pre(&mut self) {
        self.flush_line();
        self.pre = Some(String::new());
    }

    fn close_pre(&mut self) {
        if let Some(code) = self.pre.take() {
            let code = code.strip_prefix('\n').unwrap_or(&code);
            let code = code.strip_suffix('\n').unwrap_or(code);
            self.emit(PreviewBlock::Code(code.to_string()));
            self.absorb_break = true;
        }
    }

    fn open_row(&mut self) {
        if self.table.is_none() {
            self.flush_line();
            self.table = Some(Vec::new());
        }
        self.close_row();
        self.row = Some(Vec::new());
    }

    fn close_cell(&mut self) {
        if let Some(cell) = self.cell.take() {
            self.row.get_or_insert_with(Vec::new).push(cell);
        }
    }

    fn close_row(&mut self) {
        self.close_cell();
        if let Some(row) = self.row.take() {
            self.table.get_or_insert_with(Vec::new).push(row);
        }
    }

    fn close_table(&mut self) {
        self.close_row();
        if let Some(rows) = self.table.take() {
            self.emit(PreviewBlock::Table(rows));
            self.absorb_break = true;
        }
    }

    fn open_tag(&mut self, name: &str, attrs: &str) {
        match name {
            "br" => self.line_break(),
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
                let level = name[1..].parse().unwrap_or(1);
                self.start_line(LineKind::Heading(level));
            }
            "li" => {
                let kind = match self.kind {
                    Some(LineKind::Numbered(_)) => LineKind::Numbered(0),
                    _ => LineKind::Bullet,
                };
                // `<ol>`/`<ul>` already set the kind; a bare `<li>` is a bullet
                if self.runs.is_empty()
                    && matches!(self.kind, Some(LineKind::Bullet | LineKind::Numbered(_)))
                {
                    self.absorb_break = false;
                } else {
                    self.start_line(kind);
                }
            }
            "ul" => self.start_line(LineKind::Bullet),
            "ol" => self.start_line(LineKind::Numbered(0)),
            "blockquote" => self.start_line(LineKind::Quote),
            "pre" => self.open_pre(),
            "code" if self.pre.is_none() => self.code += 1,
            "b" | "strong" => self.bold += 1,
            "i" | "em" => self.italic += 1,
            "s" | "del" | "strike" => self.strike += 1,
            "a" => {
                let url = attribute(attrs, "href").unwrap_or_default();
                self.link = Some((url, String::new()));
            }
            "img" => {
                let src = attribute(attrs, "src").unwrap_or_default();
                let alt = attribute(attrs, "alt").unwrap_or_default();
                self.absorb_break = false;
                self.push_run(Run::Image { alt, src });
            }
            "table" => {
                self.flush_line();
                self.close_table();
                self.table = Some(Vec::new());
            }
            "tr" => self.open_row(),
            "td" | "th" => {
                if self.row.is_none() {
                    self.open_row();
                }
                self.close_cell();
                self.cell = Some(Vec::new());
            }
            _ => {}
        }
    }

    fn close_tag(&mut self, name: &str) {
        match name {
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "li" | "blockquote" => self.end_block_line(),
            "ul" | "ol" => {
                self.end_block_line();
                self.absorb_break = true;
            }
            "pre" => self.close_pre(),
            "code" if self.pre.is_none() => self.code = self.code.saturating_sub(1),
            "b" | "strong" => self.bold = self.bold.saturating_sub(1),
            "i" | "em" => self.italic = self.italic.saturating_sub(1),
            "s" | "del" | "strike" => self.strike = self.strike.saturating_sub(1),
            "a" => {
                if let Some((url, text)) = self.link.take() {
                    self.push_run(Run::Link { text, url });
                }
            }
            "td" | "th" => self.close_cell(),
            "tr" => self.close_row(),
            "table" => self.close_table(),
            _ => {}
        }
    }

    fn finish(mut self) -> Vec<PreviewBlock> {
        if let Some((url, text)) = self.link.take() {
            self.push_run(Run::Link { text, url });
        }
        self.close_pre();
        self.close_table();
        self.flush_line();
        self.blocks
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Public API
// ─────────────────────────────────────────────────────────────────────────────

/// Read an HTML fragment into preview blocks.
pub fn parse_fragment(html: &str) -> Vec<PreviewBlock> {
    let mut builder = Builder::default();
    let mut last = 0;

    for caps in tag_re().captures_iter(html) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        builder.text(&html[last..whole.start()]);
        last = whole.end();

        let name = caps[2].to_ascii_lowercase();
        let attrs = caps.get(3).map(|m| m.as_str()).unwrap_or("");
        if caps[1].is_empty() {
            builder.open_tag(&name, attrs);
        } else {
            builder.close_tag(&name);
        }
    }
    builder.text(&html[last..]);

    builder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::render;

    fn line(kind: LineKind, text: &str) -> PreviewBlock {
        PreviewBlock::Line {
            kind,
            runs: vec![Run::Text {
                text: text.to_string(),
                style: RunStyle::default(),
            }],
        }
    }

    fn blank() -> PreviewBlock {
        PreviewBlock::Line {
            kind: LineKind::Paragraph,
            runs: Vec::new(),
        }
    }

    #[test]
    fn test_heading_absorbs_following_break() {
        let blocks = parse_fragment(&render("# Fern\ntext"));
        assert_eq!(
            blocks,
            vec![line(LineKind::Heading(1), "Fern"), line(LineKind::Paragraph, "text")]
        );
    }

    #[test]
    fn test_blank_lines_are_kept() {
        let blocks = parse_fragment(&render("a\n\nb"));
        assert_eq!(
            blocks,
            vec![line(LineKind::Paragraph, "a"), blank(), line(LineKind::Paragraph, "b")]
        );
    }

    #[test]
    fn test_bullets_and_numbers() {
        let blocks = parse_fragment(&render("- a\n- b\n1. x\n2. y\n\n3. z"));
        assert_eq!(
            blocks,
            vec![
                line(LineKind::Bullet, "a"),
                line(LineKind::Bullet, "b"),
                line(LineKind::Numbered(1), "x"),
                line(LineKind::Numbered(2), "y"),
                blank(),
                line(LineKind::Numbered(1), "z"),
            ]
        );
    }

    #[test]
    fn test_inline_styles() {
        let blocks = parse_fragment("<b>bold</b> <i>it</i> <s>old</s> <code>pH</code>");
        let PreviewBlock::Line { runs, .. } = &blocks[0] else {
            panic!("expected a line");
        };
        let styles: Vec<RunStyle> = runs
            .iter()
            .filter_map(|r| match r {
                Run::Text { text, style } if text.trim() != "" => Some(*style),
                _ => None,
            })
            .collect();
        assert!(styles[0].bold);
        assert!(styles[1].italic);
        assert!(styles[2].strike);
        assert!(styles[3].code);
    }

    #[test]
    fn test_links_and_images() {
        let blocks = parse_fragment(&render("![leaf](img/a.png) [wiki](https://x.org/?a=1&b=2)"));
        let PreviewBlock::Line { runs, .. } = &blocks[0] else {
            panic!("expected a line");
        };
        assert_eq!(
            runs[0],
            Run::Image {
                alt: "leaf".to_string(),
                src: "img/a.png".to_string()
            }
        );
        assert_eq!(
            runs[2],
            Run::Link {
                text: "wiki".to_string(),
                url: "https://x.org/?a=1&b=2".to_string()
            }
        );
    }

    #[test]
    fn test_table_between_lines() {
        let blocks = parse_fragment(&render("Soil\n|pH|6.5|\n|Mix|peat|\nDone"));
        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[0].plain_text(), "Soil");
        assert_eq!(blocks[1].plain_text(), "pH | 6.5\nMix | peat");
        assert_eq!(blocks[2], line(LineKind::Paragraph, "Done"));
    }

    #[test]
    fn test_code_block_keeps_lines() {
        let blocks = parse_fragment(&render("```\nlet a = 1;\nlet b = 2;\n```\nafter"));
        assert_eq!(
            blocks,
            vec![
                PreviewBlock::Code("let a = 1;\nlet b = 2;".to_string()),
                line(LineKind::Paragraph, "after"),
            ]
        );
    }

    #[test]
    fn test_quote_and_entities() {
        let blocks = parse_fragment(&render("> a < b & \"c\""));
        assert_eq!(blocks, vec![line(LineKind::Quote, "a < b & \"c\"")]);
    }

    #[test]
    fn test_tolerates_broken_markup() {
        for html in [
            "",
            "</b></i></table></tr>",
            "<table><tr><td>open",
            "<pre><code>unterminated",
            "<a href=\"x\">dangling",
            "<h7>odd</h7><unknown attr>text",
            "<li>bare item</li>",
            "<<<>>>",
        ] {
            let _ = parse_fragment(html);
        }
        assert_eq!(
            parse_fragment("<table><tr><td>open").first().map(|b| b.plain_text()),
            Some("open".to_string())
        );
    }

    #[test]
    fn test_template_structure() {
        let blocks = parse_fragment(&render(crate::markdown::PLANT_TEMPLATE));
        assert_eq!(blocks[0], line(LineKind::Heading(1), "Plant"));
        assert!(blocks.contains(&line(LineKind::Heading(2), "Watering")));
        assert!(blocks.contains(&line(LineKind::Bullet, "Frequency: ")));
    }
}
