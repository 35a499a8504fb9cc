//! Line-oriented block scanner.
//!
//! Classifies each line in a single pass: fenced code, setext underlines,
//! thematic breaks, ATX headings, list items, and plain text. Indented code
//! blocks, block quotes and HTML blocks are treated as plain text.

use std::sync::LazyLock;

use regex::Regex;

use super::{
    Block, BulletGlyph, CodeBlock, Document, Heading, HeadingStyle, Line, ListItem, ListMarker,
};

/// Column width a tab advances to.
const TAB_WIDTH: usize = 4;

static FENCE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(`{3,}|~{3,})(.*)$").expect("FENCE_REGEX must compile")
});

static THEMATIC_BREAK_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:(?:\*[ \t]*){3,}|(?:-[ \t]*){3,}|(?:_[ \t]*){3,})$")
        .expect("THEMATIC_BREAK_REGEX must compile")
});

static LIST_ITEM_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:([-*+])|(\d{1,9})([.)]))(?:[ \t]+|$)").expect("LIST_ITEM_REGEX must compile")
});

struct OpenFence {
    marker: char,
    len: usize,
    line: usize,
    info: Option<String>,
}

impl OpenFence {
    fn closed_by(&self, text: &str) -> bool {
        let trimmed = text.trim();
        trimmed.chars().count() >= self.len && trimmed.chars().all(|c| c == self.marker)
    }
}

struct OpenList {
    indent: usize,
    id: usize,
    marker: ListMarker,
}

struct Paragraph {
    line: usize,
    text: String,
}

#[derive(Default)]
struct Scanner {
    lines: Vec<Line>,
    blocks: Vec<Block>,
    fence: Option<OpenFence>,
    lists: Vec<OpenList>,
    next_list: usize,
    paragraph: Option<Paragraph>,
    prev_blank: bool,
}

pub(super) fn scan(source: &str) -> Document {
    let mut scanner = Scanner::default();
    for (idx, text) in source.lines().enumerate() {
        scanner.push(idx + 1, text);
    }
    scanner.finish()
}

impl Scanner {
    fn push(&mut self, number: usize, text: &str) {
        if self.fence.is_some() {
            self.push_code(number, text);
            return;
        }

        if text.trim().is_empty() {
            self.lines.push(Line::text(number, text));
            self.paragraph = None;
            self.prev_blank = true;
            return;
        }

        let (indent, indent_chars, rest) = split_indent(text);
        self.classify(number, text, indent, indent_chars, rest);
        self.prev_blank = false;
    }

    fn push_code(&mut self, number: usize, text: &str) {
        self.lines.push(Line::code(number, text));
        if self.fence.as_ref().is_some_and(|fence| fence.closed_by(text)) {
            self.close_fence(number);
        }
    }

    fn close_fence(&mut self, end_line: usize) {
        if let Some(fence) = self.fence.take() {
            self.blocks.push(Block::CodeBlock(CodeBlock {
                line: fence.line,
                end_line,
                info: fence.info,
            }));
        }
    }

    fn classify(
        &mut self,
        number: usize,
        text: &str,
        indent: usize,
        indent_chars: usize,
        rest: &str,
    ) {
        if let Some(fence) = open_fence(number, rest) {
            self.lines.push(Line::code(number, text));
            self.paragraph = None;
            self.fence = Some(fence);
            return;
        }

        self.lines.push(Line::text(number, text));

        if indent <= 3 {
            if let Some(level) = setext_level(rest) {
                if let Some(paragraph) = self.paragraph.take() {
                    self.blocks.push(Block::Heading(Heading {
                        line: paragraph.line,
                        end_line: number,
                        level,
                        style: HeadingStyle::Setext,
                        text: paragraph.text,
                    }));
                    return;
                }
            }

            if THEMATIC_BREAK_REGEX.is_match(rest) {
                self.lists.clear();
                self.paragraph = None;
                self.blocks.push(Block::ThematicBreak { line: number });
                return;
            }

            if let Some((level, style, heading_text)) = atx_heading(rest) {
                self.lists.clear();
                self.paragraph = None;
                self.blocks.push(Block::Heading(Heading {
                    line: number,
                    end_line: number,
                    level,
                    style,
                    text: heading_text,
                }));
                return;
            }
        }

        if let Some((marker, has_content)) = list_marker(rest) {
            // Inside a paragraph only a non-empty bullet or item number 1 starts a list
            let interrupts = match marker {
                ListMarker::Bullet(_) => has_content,
                ListMarker::Ordered { number: start, .. } => start == 1 && has_content,
            };
            if self.paragraph.is_none() || !self.lists.is_empty() || interrupts {
                self.paragraph = None;
                self.push_list_item(number, indent, indent_chars + 1, marker);
                return;
            }
        }

        self.push_text(number, indent, rest);
    }

    fn push_list_item(&mut self, number: usize, indent: usize, column: usize, marker: ListMarker) {
        while self.lists.last().is_some_and(|open| open.indent > indent) {
            self.lists.pop();
        }

        let continues = self
            .lists
            .last()
            .is_some_and(|open| open.indent == indent && open.marker.same_list(&marker));
        if !continues {
            // A different glyph or delimiter at the same indent starts a new list
            if self.lists.last().is_some_and(|open| open.indent == indent) {
                self.lists.pop();
            }
            self.lists.push(OpenList {
                indent,
                id: self.next_list,
                marker,
            });
            self.next_list += 1;
        }

        let list = self.lists.last().map_or(0, |open| open.id);
        self.blocks.push(Block::ListItem(ListItem {
            line: number,
            column,
            indent,
            depth: self.lists.len().saturating_sub(1),
            list,
            marker,
        }));
    }

    fn push_text(&mut self, number: usize, indent: usize, rest: &str) {
        if indent == 0 && self.prev_blank {
            self.lists.clear();
        }
        if !self.lists.is_empty() {
            // continuation of a list item
            return;
        }

        let trimmed = rest.trim();
        match self.paragraph.as_mut() {
            Some(paragraph) => {
                paragraph.text.push(' ');
                paragraph.text.push_str(trimmed);
            }
            None => {
                self.paragraph = Some(Paragraph {
                    line: number,
                    text: trimmed.to_string(),
                })
            }
        }
    }

    fn finish(mut self) -> Document {
        if self.fence.is_some() {
            let last = self.lines.len();
            self.close_fence(last);
        }
        Document::from_parts(self.lines, self.blocks)
    }
}

/// Split leading whitespace off a line.
///
/// Returns the expanded indent width, the number of whitespace characters,
/// and the remainder of the line.
fn split_indent(text: &str) -> (usize, usize, &str) {
    let mut width = 0;
    let mut chars = 0;
    for c in text.chars() {
        match c {
            ' ' => width += 1,
            '\t' => width += TAB_WIDTH - width % TAB_WIDTH,
            _ => break,
        }
        chars += 1;
    }
    (width, chars, &text[chars..])
}

fn open_fence(number: usize, rest: &str) -> Option<OpenFence> {
    let caps = FENCE_REGEX.captures(rest)?;
    let run = caps.get(1)?.as_str();
    let info = caps.get(2).map_or("", |m| m.as_str()).trim();
    let marker = run.chars().next()?;

    if marker == '`' && info.contains('`') {
        return None;
    }

    Some(OpenFence {
        marker,
        len: run.chars().count(),
        line: number,
        info: (!info.is_empty()).then(|| info.to_string()),
    })
}

fn setext_level(rest: &str) -> Option<u8> {
    let underline = rest.trim_end();
    if underline.is_empty() {
        None
    } else if underline.chars().all(|c| c == '=') {
        Some(1)
    } else if underline.chars().all(|c| c == '-') {
        Some(2)
    } else {
        None
    }
}

fn atx_heading(rest: &str) -> Option<(u8, HeadingStyle, String)> {
    let hashes = rest.chars().take_while(|&c| c == '#').count();
    if !(1..=6).contains(&hashes) {
        return None;
    }

    let after = &rest[hashes..];
    if !after.is_empty() && !after.starts_with([' ', '\t']) {
        return None;
    }

    let level = hashes as u8;
    let content = after.trim();
    let stripped = content.trim_end_matches('#');
    if stripped.len() < content.len() && (stripped.is_empty() || stripped.ends_with([' ', '\t'])) {
        return Some((level, HeadingStyle::AtxClosed, stripped.trim().to_string()));
    }

    Some((level, HeadingStyle::Atx, content.to_string()))
}

/// Parse a list marker, and whether the item has text after it.
fn list_marker(rest: &str) -> Option<(ListMarker, bool)> {
    let caps = LIST_ITEM_REGEX.captures(rest)?;
    let has_content = !rest[caps.get(0)?.end()..].trim().is_empty();

    if let Some(bullet) = caps.get(1) {
        let glyph = bullet.as_str().chars().next().and_then(BulletGlyph::from_char)?;
        return Some((ListMarker::Bullet(glyph), has_content));
    }

    let number = caps.get(2)?.as_str().parse().ok()?;
    let delimiter = caps.get(3)?.as_str().chars().next()?;
    Some((ListMarker::Ordered { number, delimiter }, has_content))
}
