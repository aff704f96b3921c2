//! Markdown to HTML rendering
//!
//! The renderer is an ordered list of whole-text regex substitutions. Later
//! rules see the output of earlier ones, so the order below is part of the
//! contract:
//!
//! 1. escape `& < > "` so user text never becomes markup
//! 2. table rows (`|a|b|`) become `<tr><td>..</td></tr>`
//! 3. fenced code, then inline code
//! 4. headings, one rule per level
//! 5. bold before italic, then strikethrough, images, links
//! 6. one self-contained list per `- ` / `N. ` line, blockquotes
//! 7. newlines become `<br>`
//! 8. table rows are stitched into `<table>` elements
//!
//! Line-anchored rules run in multi-line mode *before* newlines are turned
//! into break tags, so `^`/`$` bind to every line of the document.
//!
//! There is no AST and no error path: every input produces some HTML.

use regex::{Captures, Regex};
use std::sync::OnceLock;

// ─────────────────────────────────────────────────────────────────────────────
// Compiled Rules
// ─────────────────────────────────────────────────────────────────────────────

struct RenderRules {
    table_row: Regex,
    fenced_code: Regex,
    inline_code: Regex,
    /// Index 0 is `#`, index 5 is `######`.
    headings: Vec<Regex>,
    bold: Regex,
    italic: Regex,
    strikethrough: Regex,
    image: Regex,
    link: Regex,
    bullet_item: Regex,
    numbered_item: Regex,
    blockquote: Regex,
}

impl RenderRules {
    fn new() -> Self {
        let headings = (1..=6)
            .map(|level| compile(&format!(r"(?m)^#{{{}}} (.*)$", level)))
            .collect();

        Self {
            table_row: compile(r"\|(.+)\|"),
            fenced_code: compile(r"```([^`]*)```"),
            inline_code: compile(r"`([^`]+)`"),
            headings,
            bold: compile(r"\*\*([^*]+)\*\*"),
            italic: compile(r"\*([^*]+)\*"),
            strikethrough: compile(r"~~([^~]+)~~"),
            // `<dest>` has already been escaped to `&lt;dest&gt;`
            image: compile(r"!\[([^\]]*)\]\((?:&lt;(.*?)&gt;|([^)\s]+))\)"),
            link: compile(r"\[([^\]]+)\]\((?:&lt;(.*?)&gt;|([^)\s]+))\)"),
            bullet_item: compile(r"(?m)^- (.*)$"),
            numbered_item: compile(r"(?m)^\d+\. (.*)$"),
            // `>` has already been escaped at this point
            blockquote: compile(r"(?m)^&gt; (.*)$"),
        }
    }
}

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("render rule patterns are constant and valid")
}

static RULES: OnceLock<RenderRules> = OnceLock::new();

fn rules() -> &'static RenderRules {
    RULES.get_or_init(RenderRules::new)
}

// ─────────────────────────────────────────────────────────────────────────────
// Public API
// ─────────────────────────────────────────────────────────────────────────────

/// Render a whole document to an HTML fragment for the preview pane.
///
/// The output is a single blob: lines are separated by `<br>` rather than
/// wrapped in paragraph elements.
pub fn render(markdown: &str) -> String {
    let rules = rules();

    let normalized = markdown.replace("\r\n", "\n");
    let mut html = escape_html(&normalized);

    html = rules
        .table_row
        .replace_all(&html, |caps: &Captures| table_row_html(&caps[1]))
        .into_owned();

    html = rules
        .fenced_code
        .replace_all(&html, "<pre><code>$1</code></pre>")
        .into_owned();
    html = rules
        .inline_code
        .replace_all(&html, "<code>$1</code>")
        .into_owned();

    for (index, heading) in rules.headings.iter().enumerate() {
        let level = index + 1;
        let replacement = format!("<h{level}>${{1}}</h{level}>");
        html = heading.replace_all(&html, replacement.as_str()).into_owned();
    }

    // Bold first so the single-asterisk rule never eats half of a `**` pair
    html = rules.bold.replace_all(&html, "<b>$1</b>").into_owned();
    html = rules.italic.replace_all(&html, "<i>$1</i>").into_owned();
    html = rules
        .strikethrough
        .replace_all(&html, "<s>$1</s>")
        .into_owned();

    // Images before links: `![a](b)` contains a link-shaped suffix
    html = rules
        .image
        .replace_all(&html, |caps: &Captures| {
            format!(r#"<img src="{}" alt="{}">"#, destination(caps), &caps[1])
        })
        .into_owned();
    html = rules
        .link
        .replace_all(&html, |caps: &Captures| {
            format!(r#"<a href="{}">{}</a>"#, destination(caps), &caps[1])
        })
        .into_owned();

    html = rules
        .bullet_item
        .replace_all(&html, "<ul><li>$1</li></ul>")
        .into_owned();
    html = rules
        .numbered_item
        .replace_all(&html, "<ol><li>$1</li></ol>")
        .into_owned();
    html = rules
        .blockquote
        .replace_all(&html, "<blockquote>$1</blockquote>")
        .into_owned();

    html = html.replace('\n', "<br>");

    stitch_tables(&html)
}

/// Escape the characters that would otherwise be read as markup.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// The target of an image or link match, bracketed or bare.
fn destination<'t>(caps: &Captures<'t>) -> &'t str {
    caps.get(2)
        .or_else(|| caps.get(3))
        .map_or("", |m| m.as_str())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tables
// ─────────────────────────────────────────────────────────────────────────────

/// Build a `<tr>` from the text between the outer pipes of a row.
fn table_row_html(inner: &str) -> String {
    let mut row = String::from("<tr>");
    for cell in inner.split('|') {
        row.push_str("<td>");
        row.push_str(cell.trim());
        row.push_str("</td>");
    }
    row.push_str("</tr>");
    row
}

/// Wrap runs of adjacent rows in `<table>` elements.
///
/// This is a textual heuristic. Rows separated only by a line break join one
/// table; anything else between two rows splits them into separate tables.
fn stitch_tables(html: &str) -> String {
    let mut out = html
        .replace("</tr><br><tr>", "</tr><tr>")
        .replace("<br><tr>", "<table><tr>")
        .replace("</tr><br>", "</tr></table><br>");

    if out.starts_with("<tr>") {
        out.insert_str(0, "<table>");
    }
    if out.ends_with("</tr>") {
        out.push_str("</table>");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::image_markup;
    use std::path::Path;

    #[test]
    fn test_heading_level_one() {
        let html = render("# Title");
        assert!(html.contains("<h1>Title</h1>"), "got {html}");
    }

    #[test]
    fn test_all_heading_levels_bind_per_line() {
        let html = render("# One\n## Two\n### Three\n#### Four\n##### Five\n###### Six");
        assert_eq!(
            html,
            "<h1>One</h1><br><h2>Two</h2><br><h3>Three</h3><br>\
             <h4>Four</h4><br><h5>Five</h5><br><h6>Six</h6>"
        );
    }

    #[test]
    fn test_seven_hashes_is_not_a_heading() {
        let html = render("####### nope");
        assert!(!html.contains("<h"));
    }

    #[test]
    fn test_heading_requires_space() {
        assert_eq!(render("#tag"), "#tag");
    }

    #[test]
    fn test_bold_and_italic() {
        let html = render("**bold** and *italic*");
        assert_eq!(html, "<b>bold</b> and <i>italic</i>");
    }

    #[test]
    fn test_bold_not_split_by_italic_rule() {
        let html = render("**strong**");
        assert!(html.contains("<b>strong</b>"));
        assert!(!html.contains("<i>"));
    }

    #[test]
    fn test_list_items_are_not_merged() {
        let html = render("- a\n- b");
        assert_eq!(html, "<ul><li>a</li></ul><br><ul><li>b</li></ul>");
        assert_eq!(html.matches("<ul>").count(), 2);
    }

    #[test]
    fn test_numbered_items() {
        let html = render("1. water\n2. feed");
        assert_eq!(html, "<ol><li>water</li></ol><br><ol><li>feed</li></ol>");
    }

    #[test]
    fn test_single_table_row() {
        let html = render("|a|b|");
        assert_eq!(html, "<table><tr><td>a</td><td>b</td></tr></table>");
        assert_eq!(html.matches("<tr>").count(), 1);
    }

    #[test]
    fn test_table_cells_are_trimmed() {
        let html = render("|  a  |   b |");
        assert!(html.contains("<tr><td>a</td><td>b</td></tr>"));
    }

    #[test]
    fn test_adjacent_rows_join_one_table() {
        let html = render("Soil\n|pH|6.5|\n|Mix|peat|\nDone");
        assert_eq!(
            html,
            "Soil<table><tr><td>pH</td><td>6.5</td></tr>\
             <tr><td>Mix</td><td>peat</td></tr></table><br>Done"
        );
    }

    #[test]
    fn test_fenced_code_keeps_content() {
        let html = render("```\nlet x = 1;\n```");
        assert_eq!(html, "<pre><code><br>let x = 1;<br></code></pre>");
    }

    #[test]
    fn test_inline_code() {
        assert_eq!(render("use `pH` meter"), "use <code>pH</code> meter");
    }

    #[test]
    fn test_strikethrough() {
        assert_eq!(render("~~old~~"), "<s>old</s>");
    }

    #[test]
    fn test_image_before_link() {
        let html = render("![leaf](img/leaf.png) and [site](https://example.org)");
        assert_eq!(
            html,
            r#"<img src="img/leaf.png" alt="leaf"> and <a href="https://example.org">site</a>"#
        );
    }

    #[test]
    fn test_blockquote() {
        assert_eq!(
            render("> keep moist"),
            "<blockquote>keep moist</blockquote>"
        );
    }

    #[test]
    fn test_markup_in_source_is_escaped() {
        let html = render("<script>alert(1)</script> & \"q\"");
        assert_eq!(
            html,
            "&lt;script&gt;alert(1)&lt;/script&gt; &amp; &quot;q&quot;"
        );
    }

    #[test]
    fn test_crlf_is_normalized() {
        assert_eq!(render("# A\r\nb"), "<h1>A</h1><br>b");
    }

    #[test]
    fn test_template_renders_headings_and_lists() {
        let html = render(crate::markdown::template::PLANT_TEMPLATE);
        assert!(html.contains("<h1>Plant</h1>"));
        assert!(html.contains("<h2>Watering</h2>"));
        assert!(html.contains("<ul><li>Frequency: </li></ul>"));
    }

    #[test]
    fn test_render_is_total_on_awkward_input() {
        let inputs = [
            "",
            "\n\n\n",
            "*",
            "**",
            "***",
            "``` unterminated",
            "|",
            "||",
            "| |",
            "[](",
            "![",
            "# ",
            "- ",
            "1.",
            "🌱 **мята** *ü*",
            "|a|\n\n|b|",
            "<br><tr>",
        ];
        for input in inputs {
            let _ = render(input);
        }
    }

    #[test]
    fn test_render_is_pure() {
        let text = "# Fern\n- shade\n|a|b|";
        assert_eq!(render(text), render(text));
    }

    #[test]
    fn test_table_cells_keep_inline_markup() {
        let html = render("|**a**|`b`|");
        assert_eq!(
            html,
            "<table><tr><td><b>a</b></td><td><code>b</code></td></tr></table>"
        );
    }

    #[test]
    fn test_row_inside_list_line_stays_in_the_item() {
        assert_eq!(render("- |a|"), "<ul><li><tr><td>a</td></tr></li></ul>");
    }

    #[test]
    fn test_inserted_image_with_spaces_and_parens_renders() {
        let (markup, _) = image_markup(Path::new("/home/u/My Plants/fern (1).png"), None);
        let html = render(&markup);
        assert!(
            html.contains(r#"<img src="/home/u/My Plants/fern (1).png" alt="#),
            "got {html}"
        );
        assert!(!html.contains("!["), "got {html}");
    }

    #[test]
    fn test_bracketed_link_destination() {
        let html = render("[care guide](<docs/ficus care.md>) and [x](y)");
        assert_eq!(
            html,
            r#"<a href="docs/ficus care.md">care guide</a> and <a href="y">x</a>"#
        );
    }

    #[test]
    fn test_bare_image_destination_still_renders() {
        let html = render("![leaf](img/leaf.png)");
        assert_eq!(html, r#"<img src="img/leaf.png" alt="leaf">"#);
    }
}
