//! Markdown to styled lines with comrak.

use comrak::nodes::{AstNode, ListDelimType, ListType, NodeValue, TableAlignment};
use comrak::{Arena, Options, parse_document};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::RenderError;
use super::types::{InlineSpan, InlineStyle, LineType, RenderedLine};
use crate::highlight::Highlighter;

const CODE_RIGHT_PADDING: usize = 3;
/// Columns a code frame adds around its content: `│ ` + padding + ` │`.
const CODE_FRAME_WIDTH: usize = 2 + CODE_RIGHT_PADDING + 2;

/// Render one slide's markdown into lines no wider than `width` columns.
pub(super) fn render_lines(
    source: &str,
    width: usize,
    highlighter: &Highlighter,
) -> Result<Vec<RenderedLine>, RenderError> {
    let arena = Arena::new();
    let root = parse_document(&arena, source, &create_options());

    let mut writer = SlideWriter {
        lines: Vec::new(),
        width,
        highlighter,
    };
    writer.block(root, 0, None)?;
    Ok(writer.lines)
}

fn create_options() -> Options {
    let mut options = Options::default();

    // GFM extensions
    options.extension.strikethrough = true;
    options.extension.table = true;
    options.extension.autolink = true;
    options.extension.tasklist = true;

    // `:smile:` style emoji
    options.extension.shortcodes = true;

    options
}

struct SlideWriter<'h> {
    lines: Vec<RenderedLine>,
    width: usize,
    highlighter: &'h Highlighter,
}

impl SlideWriter<'_> {
    fn block<'a>(
        &mut self,
        node: &'a AstNode<'a>,
        depth: usize,
        list_marker: Option<&str>,
    ) -> Result<(), RenderError> {
        match &node.data.borrow().value {
            NodeValue::Heading(heading) => {
                if !self.lines.is_empty() {
                    ensure_trailing_empty_lines(&mut self.lines, 1);
                }
                let prefix = format!("{} ", "#".repeat(usize::from(heading.level)));
                let indent = " ".repeat(prefix.len());
                let spans = collect_inline_spans(node);
                self.push_wrapped(&spans, LineType::Heading(heading.level), &prefix, &indent);
                self.push_empty();
            }

            NodeValue::Paragraph => {
                if let Some(alts) = image_only_paragraph(node) {
                    for alt in alts {
                        let placeholder = truncate_text(&format!("[Image: {alt}]"), self.width);
                        self.lines
                            .push(RenderedLine::new(placeholder, LineType::Image));
                    }
                } else {
                    let spans = collect_inline_spans(node);
                    self.push_wrapped(&spans, LineType::Paragraph, "", "");
                }
                self.push_empty();
            }

            NodeValue::CodeBlock(code_block) => {
                let language = code_block
                    .info
                    .split_whitespace()
                    .next()
                    .map(ToString::to_string);
                let literal = code_block.literal.clone();
                self.code_block(language.as_deref(), &literal)?;
                self.push_empty();
            }

            NodeValue::List(list) => {
                let delimiter = match list.delimiter {
                    ListDelimType::Paren => ')',
                    ListDelimType::Period => '.',
                };
                let list_len = node.children().count();
                let number_width = (list.start + list_len.saturating_sub(1)).to_string().len();

                for (index, child) in node.children().enumerate() {
                    let marker = match list.list_type {
                        ListType::Bullet => "• ".to_string(),
                        ListType::Ordered => format!(
                            "{:>number_width$}{delimiter} ",
                            list.start + index
                        ),
                    };
                    self.block(child, depth + 1, Some(&marker))?;
                }
                if depth == 0 {
                    self.push_empty();
                }
            }

            NodeValue::Item(_) | NodeValue::TaskItem(_) => {
                let marker = match &node.data.borrow().value {
                    NodeValue::TaskItem(Some(_)) => "✓ ".to_string(),
                    NodeValue::TaskItem(None) => "□ ".to_string(),
                    _ => list_marker.unwrap_or("- ").to_string(),
                };
                self.list_item(node, depth, &marker)?;
            }

            NodeValue::BlockQuote => {
                self.blockquote(node, 1);
                self.push_empty();
            }

            NodeValue::ThematicBreak => {
                self.lines.push(RenderedLine::new(
                    "─".repeat(self.width),
                    LineType::HorizontalRule,
                ));
                self.push_empty();
            }

            NodeValue::Table(_) => {
                for line in render_table(node, self.width) {
                    self.lines.push(RenderedLine::new(line, LineType::Table));
                }
                self.push_empty();
            }

            NodeValue::HtmlBlock(html) => {
                for raw_line in html.literal.lines() {
                    let spans = vec![InlineSpan::new(raw_line.to_string(), InlineStyle::default())];
                    self.push_wrapped(&spans, LineType::Paragraph, "", "");
                }
                self.push_empty();
            }

            _ => {
                for child in node.children() {
                    self.block(child, depth, list_marker)?;
                }
            }
        }
        Ok(())
    }

    fn list_item<'a>(
        &mut self,
        node: &'a AstNode<'a>,
        depth: usize,
        marker: &str,
    ) -> Result<(), RenderError> {
        let indent = "  ".repeat(depth.saturating_sub(1));
        let prefix_first = format!("{indent}{marker}");
        let prefix_next = format!("{indent}{}", " ".repeat(display_width(marker)));
        let mut paragraphs = 0usize;

        for child in node.children() {
            match &child.data.borrow().value {
                NodeValue::Paragraph => {
                    if paragraphs > 0 {
                        self.lines
                            .push(RenderedLine::new(String::new(), LineType::ListItem(depth)));
                    }
                    let prefix = if paragraphs == 0 {
                        &prefix_first
                    } else {
                        &prefix_next
                    };
                    let spans = collect_inline_spans(child);
                    self.push_wrapped(&spans, LineType::ListItem(depth), prefix, &prefix_next);
                    paragraphs += 1;
                }
                _ => self.block(child, depth, None)?,
            }
        }

        if paragraphs == 0 {
            self.push_wrapped(&[], LineType::ListItem(depth), &prefix_first, &prefix_next);
        }
        Ok(())
    }

    fn blockquote<'a>(&mut self, node: &'a AstNode<'a>, quote_depth: usize) {
        let prefix = quote_prefix(quote_depth);

        for child in node.children() {
            match &child.data.borrow().value {
                NodeValue::Paragraph => {
                    let spans = collect_inline_spans(child);
                    self.push_wrapped(&spans, LineType::BlockQuote, &prefix, &prefix);
                }
                NodeValue::BlockQuote => self.blockquote(child, quote_depth + 1),
                _ => {
                    let text = extract_text(child);
                    for raw_line in text.lines() {
                        let spans =
                            vec![InlineSpan::new(raw_line.to_string(), InlineStyle::default())];
                        self.push_wrapped(&spans, LineType::BlockQuote, &prefix, &prefix);
                    }
                }
            }
        }
    }

    fn code_block(&mut self, language: Option<&str>, literal: &str) -> Result<(), RenderError> {
        let content_width = literal
            .lines()
            .map(display_width)
            .max()
            .unwrap_or(0)
            .min(self.width.saturating_sub(CODE_FRAME_WIDTH).max(1));
        let frame_inner_width = content_width + 2 + CODE_RIGHT_PADDING;

        let label = format!(" {} ", language.unwrap_or("code"));
        let visible_label = truncate_text(&label, frame_inner_width);
        let top = format!(
            "┌{}{}┐",
            visible_label,
            "─".repeat(frame_inner_width.saturating_sub(display_width(&visible_label)))
        );
        self.lines.push(RenderedLine::new(top, LineType::CodeBlock));

        for spans in self.highlighter.highlight(language, literal)? {
            let trimmed = truncate_spans(&spans, content_width);
            let used = display_width(&spans_to_string(&trimmed));
            let padding = " ".repeat(content_width.saturating_sub(used) + CODE_RIGHT_PADDING);

            let mut line_spans = Vec::with_capacity(trimmed.len() + 2);
            line_spans.push(InlineSpan::new("│ ".to_string(), InlineStyle::default()));
            line_spans.extend(trimmed);
            line_spans.push(InlineSpan::new(format!("{padding} │"), InlineStyle::default()));
            let content = spans_to_string(&line_spans);
            self.lines.push(RenderedLine::with_spans(
                content,
                LineType::CodeBlock,
                line_spans,
            ));
        }

        self.lines.push(RenderedLine::new(
            format!("└{}┘", "─".repeat(frame_inner_width)),
            LineType::CodeBlock,
        ));
        Ok(())
    }

    fn push_wrapped(
        &mut self,
        spans: &[InlineSpan],
        line_type: LineType,
        prefix_first: &str,
        prefix_next: &str,
    ) {
        for line_spans in wrap_spans(spans, self.width, prefix_first, prefix_next) {
            let content = spans_to_string(&line_spans);
            self.lines
                .push(RenderedLine::with_spans(content, line_type, line_spans));
        }
    }

    fn push_empty(&mut self) {
        ensure_trailing_empty_lines(&mut self.lines, 1);
    }
}

fn ensure_trailing_empty_lines(lines: &mut Vec<RenderedLine>, count: usize) {
    let existing = lines
        .iter()
        .rev()
        .take_while(|line| matches!(line.line_type(), LineType::Empty))
        .count();
    for _ in existing..count {
        lines.push(RenderedLine::empty());
    }
}

fn quote_prefix(depth: usize) -> String {
    let mut prefix = String::from("  ");
    for _ in 0..depth {
        prefix.push_str("│ ");
    }
    prefix
}

/// Alt texts of a paragraph made of images and whitespace only.
fn image_only_paragraph<'a>(node: &'a AstNode<'a>) -> Option<Vec<String>> {
    let mut alts = Vec::new();
    for child in node.children() {
        match &child.data.borrow().value {
            NodeValue::Image(image) => {
                let alt = extract_text(child);
                alts.push(if alt.is_empty() { image.url.clone() } else { alt });
            }
            NodeValue::SoftBreak | NodeValue::LineBreak => {}
            NodeValue::Text(text) if text.trim().is_empty() => {}
            _ => return None,
        }
    }
    (!alts.is_empty()).then_some(alts)
}

fn render_table<'a>(table_node: &'a AstNode<'a>, wrap_width: usize) -> Vec<String> {
    let (alignments, mut rows, has_header) = collect_table_rows(table_node);
    let num_cols = rows.iter().map(Vec::len).max().unwrap_or(0);
    if num_cols == 0 {
        return Vec::new();
    }

    for row in &mut rows {
        row.resize(num_cols, String::new());
    }

    let mut col_widths = vec![1_usize; num_cols];
    for row in &rows {
        for (idx, cell) in row.iter().enumerate() {
            col_widths[idx] = col_widths[idx].max(display_width(cell));
        }
    }

    // Row width is 1 + sum(col_width + 3); shrink the widest column until it fits.
    while 1 + col_widths.iter().sum::<usize>() + (3 * num_cols) > wrap_width {
        let Some((widest, _)) = col_widths.iter().enumerate().max_by_key(|(_, w)| **w) else {
            break;
        };
        if col_widths[widest] <= 1 {
            break;
        }
        col_widths[widest] -= 1;
    }

    let mid = render_table_border(&col_widths, '├', '┼', '┤');
    let mut lines = Vec::with_capacity(rows.len() + 3);
    lines.push(render_table_border(&col_widths, '┌', '┬', '┐'));
    for (idx, row) in rows.iter().enumerate() {
        lines.push(render_table_row(row, &col_widths, &alignments));
        if has_header && idx == 0 {
            lines.push(mid.clone());
        }
    }
    lines.push(render_table_border(&col_widths, '└', '┴', '┘'));

    // Very narrow layouts can still overflow with one-column cells.
    lines
        .into_iter()
        .map(|line| truncate_text(&line, wrap_width))
        .collect()
}

fn collect_table_rows<'a>(
    table_node: &'a AstNode<'a>,
) -> (Vec<TableAlignment>, Vec<Vec<String>>, bool) {
    let alignments = match &table_node.data.borrow().value {
        NodeValue::Table(table) => table.alignments.clone(),
        _ => Vec::new(),
    };

    let mut rows = Vec::new();
    let mut has_header = false;
    for row_node in table_node.children() {
        let NodeValue::TableRow(header) = row_node.data.borrow().value else {
            continue;
        };
        has_header |= header;

        let cells = row_node
            .children()
            .filter(|cell| matches!(cell.data.borrow().value, NodeValue::TableCell))
            .map(|cell| {
                extract_text(cell)
                    .split_whitespace()
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect();
        rows.push(cells);
    }

    (alignments, rows, has_header)
}

fn render_table_border(widths: &[usize], left: char, middle: char, right: char) -> String {
    let mut out = String::new();
    out.push(left);
    for (idx, width) in widths.iter().enumerate() {
        out.push_str(&"─".repeat(width + 2));
        if idx + 1 < widths.len() {
            out.push(middle);
        }
    }
    out.push(right);
    out
}

fn render_table_row(cells: &[String], widths: &[usize], alignments: &[TableAlignment]) -> String {
    let mut out = String::from("│");
    for (idx, width) in widths.iter().enumerate() {
        let content = truncate_text(cells.get(idx).map_or("", String::as_str), *width);
        let padding = width.saturating_sub(display_width(&content));

        out.push(' ');
        match alignments.get(idx).copied().unwrap_or(TableAlignment::None) {
            TableAlignment::Right => {
                out.push_str(&" ".repeat(padding));
                out.push_str(&content);
            }
            TableAlignment::Center => {
                let left = padding / 2;
                out.push_str(&" ".repeat(left));
                out.push_str(&content);
                out.push_str(&" ".repeat(padding - left));
            }
            TableAlignment::Left | TableAlignment::None => {
                out.push_str(&content);
                out.push_str(&" ".repeat(padding));
            }
        }
        out.push_str(" │");
    }
    out
}

fn collect_inline_spans<'a>(node: &'a AstNode<'a>) -> Vec<InlineSpan> {
    let mut spans = Vec::new();
    for child in node.children() {
        collect_inline_spans_recursive(child, InlineStyle::default(), &mut spans);
    }
    spans
}

fn collect_inline_spans_recursive<'a>(
    node: &'a AstNode<'a>,
    style: InlineStyle,
    spans: &mut Vec<InlineSpan>,
) {
    let mut next = style;
    match &node.data.borrow().value {
        // Nested blocks inside list items are rendered separately.
        NodeValue::List(_) | NodeValue::Item(_) => return,
        NodeValue::Text(text) => {
            spans.push(InlineSpan::new(text.clone(), style));
            return;
        }
        NodeValue::Code(code) => {
            let code_style = InlineStyle {
                code: true,
                emphasis: false,
                strong: false,
                strikethrough: false,
                ..style
            };
            spans.push(InlineSpan::new(code.literal.clone(), code_style));
            return;
        }
        NodeValue::ShortCode(shortcode) => {
            spans.push(InlineSpan::new(shortcode.emoji.clone(), style));
            return;
        }
        NodeValue::HtmlInline(html) => {
            spans.push(InlineSpan::new(html.clone(), style));
            return;
        }
        NodeValue::Image(image) => {
            let alt = extract_text(node);
            let label = if alt.is_empty() { image.url.clone() } else { alt };
            spans.push(InlineSpan::new(format!("[Image: {label}]"), style));
            return;
        }
        NodeValue::SoftBreak | NodeValue::LineBreak => {
            spans.push(InlineSpan::new(" ".to_string(), style));
            return;
        }
        NodeValue::Emph => next.emphasis = true,
        NodeValue::Strong => next.strong = true,
        NodeValue::Strikethrough => next.strikethrough = true,
        NodeValue::Link(_) => next.link = true,
        _ => {}
    }
    for child in node.children() {
        collect_inline_spans_recursive(child, next, spans);
    }
}

fn extract_text<'a>(node: &'a AstNode<'a>) -> String {
    let mut text = String::new();
    extract_text_recursive(node, &mut text);
    text
}

fn extract_text_recursive<'a>(node: &'a AstNode<'a>, text: &mut String) {
    match &node.data.borrow().value {
        NodeValue::Text(t) => text.push_str(t),
        NodeValue::Code(c) => {
            text.push('`');
            text.push_str(&c.literal);
            text.push('`');
        }
        NodeValue::ShortCode(shortcode) => text.push_str(&shortcode.emoji),
        NodeValue::SoftBreak | NodeValue::LineBreak => text.push('\n'),
        _ => {
            for child in node.children() {
                extract_text_recursive(child, text);
            }
        }
    }
}

/// Greedy word wrap over styled spans.
///
/// Every returned line fits in `width` display columns, provided the prefixes
/// themselves fit. Words longer than a whole line are split.
fn wrap_spans(
    spans: &[InlineSpan],
    width: usize,
    prefix_first: &str,
    prefix_next: &str,
) -> Vec<Vec<InlineSpan>> {
    let mut lines = Vec::new();
    let mut line = WrapLine::start(prefix_first);

    for token in spans.iter().flat_map(split_inline_tokens) {
        let token_is_ws = token.text().chars().all(char::is_whitespace);
        if token_is_ws && !line.has_word {
            // Drop leading whitespace at line starts.
            continue;
        }

        let mut pending = token;
        loop {
            if line.width + display_width(pending.text()) <= width {
                line.push(pending);
                break;
            }
            if token_is_ws {
                // Whitespace that would overflow becomes the line break.
                lines.push(std::mem::replace(&mut line, WrapLine::start(prefix_next)).finish());
                break;
            }
            if line.has_word {
                lines.push(std::mem::replace(&mut line, WrapLine::start(prefix_next)).finish());
                continue;
            }
            // A single word wider than the line: split it at the edge.
            let room = width.saturating_sub(line.width).max(1);
            let mut head = truncate_text(pending.text(), room);
            if head.is_empty() {
                head = pending.text().chars().take(1).collect();
            }
            let tail = pending.text()[head.len()..].to_string();
            line.push(InlineSpan::new(head, pending.style()));
            lines.push(std::mem::replace(&mut line, WrapLine::start(prefix_next)).finish());
            if tail.is_empty() {
                break;
            }
            pending = InlineSpan::new(tail, pending.style());
        }
    }

    if line.has_word || lines.is_empty() {
        lines.push(line.finish());
    }
    lines
}

struct WrapLine {
    spans: Vec<InlineSpan>,
    prefix_spans: usize,
    width: usize,
    has_word: bool,
}

impl WrapLine {
    fn start(prefix: &str) -> Self {
        let mut spans = Vec::new();
        if !prefix.is_empty() {
            spans.push(InlineSpan::new(prefix.to_string(), InlineStyle::default()));
        }
        Self {
            prefix_spans: spans.len(),
            spans,
            width: display_width(prefix),
            has_word: false,
        }
    }

    fn push(&mut self, span: InlineSpan) {
        self.width += display_width(span.text());
        self.spans.push(span);
        self.has_word = true;
    }

    /// Drop trailing whitespace; it is invisible but still counts as width.
    fn finish(mut self) -> Vec<InlineSpan> {
        while self.spans.len() > self.prefix_spans
            && self
                .spans
                .last()
                .is_some_and(|span| span.text().trim().is_empty())
        {
            self.spans.pop();
        }
        self.spans
    }
}

fn split_inline_tokens(span: &InlineSpan) -> Vec<InlineSpan> {
    let mut out = Vec::new();
    let mut buf = String::new();
    let mut ws_state: Option<bool> = None;

    for ch in span.text().chars() {
        let is_ws = ch.is_whitespace();
        if ws_state.is_some_and(|state| state != is_ws) {
            out.push(InlineSpan::new(std::mem::take(&mut buf), span.style()));
        }
        buf.push(ch);
        ws_state = Some(is_ws);
    }

    if !buf.is_empty() {
        out.push(InlineSpan::new(buf, span.style()));
    }
    out
}

fn spans_to_string(spans: &[InlineSpan]) -> String {
    spans.iter().map(InlineSpan::text).collect()
}

fn truncate_spans(spans: &[InlineSpan], max_width: usize) -> Vec<InlineSpan> {
    let mut out = Vec::new();
    let mut remaining = max_width;
    for span in spans {
        if remaining == 0 {
            break;
        }
        let taken = truncate_text(span.text(), remaining);
        let used = display_width(&taken);
        if !taken.is_empty() {
            out.push(InlineSpan::new(taken, span.style()));
            remaining -= used;
        }
        if used < display_width(span.text()) {
            break;
        }
    }
    out
}

fn truncate_text(text: &str, max_width: usize) -> String {
    let mut out = String::new();
    let mut width = 0usize;
    for ch in text.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width > max_width {
            break;
        }
        out.push(ch);
        width += ch_width;
    }
    out
}

fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}
