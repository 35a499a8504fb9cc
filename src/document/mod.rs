//! Markdown document model.
//!
//! A [`Document`] is the read-only input every lint rule walks. It holds
//! the raw source lines and the block nodes rules care about (headings,
//! list items, fenced code blocks, thematic breaks), each carrying a
//! 1-indexed source line and, where it makes sense, a column.
//!
//! Any producer can assemble a document with [`Document::from_parts`].
//! [`Document::parse`] runs the bundled line scanner, which recognises only
//! the block structure the built-in rules need; it is not a full Markdown
//! parser.
//!
//! # Example
//!
//! ```
//! use mdguard::document::{Document, HeadingStyle};
//!
//! let doc = Document::parse("# Title\n\n- one\n- two\n");
//! let heading = doc.headings().next().unwrap();
//! assert_eq!(heading.level, 1);
//! assert_eq!(heading.style, HeadingStyle::Atx);
//! assert_eq!(doc.list_items().count(), 2);
//! ```

pub mod inline;
mod scan;

use std::fmt;

/// One physical line of the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// Line number (1-indexed).
    pub number: usize,
    /// Line text without the trailing newline.
    pub text: String,
    /// Whether the line belongs to a fenced code block, fences included.
    pub in_code: bool,
}

impl Line {
    /// Create a line outside any code block.
    pub fn text(number: usize, text: impl Into<String>) -> Self {
        Self {
            number,
            text: text.into(),
            in_code: false,
        }
    }

    /// Create a line inside a code block.
    pub fn code(number: usize, text: impl Into<String>) -> Self {
        Self {
            number,
            text: text.into(),
            in_code: true,
        }
    }

    /// Whether the line has no visible content.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// How a heading is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeadingStyle {
    /// `# Heading`
    Atx,
    /// `# Heading #`
    AtxClosed,
    /// `Heading` underlined with `===` or `---`
    Setext,
}

impl HeadingStyle {
    /// Name used in messages and policy options.
    pub fn as_str(&self) -> &'static str {
        match self {
            HeadingStyle::Atx => "atx",
            HeadingStyle::AtxClosed => "atx_closed",
            HeadingStyle::Setext => "setext",
        }
    }
}

impl fmt::Display for HeadingStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A heading node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    /// First line of the heading.
    pub line: usize,
    /// Last line of the heading (the underline for setext headings).
    pub end_line: usize,
    /// Heading level, 1 to 6.
    pub level: u8,
    /// Marker style.
    pub style: HeadingStyle,
    /// Heading text with markers stripped.
    pub text: String,
}

/// Glyph used by a bullet list item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BulletGlyph {
    /// `-`
    Dash,
    /// `*`
    Asterisk,
    /// `+`
    Plus,
}

impl BulletGlyph {
    /// Map a marker character to a glyph.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '-' => Some(BulletGlyph::Dash),
            '*' => Some(BulletGlyph::Asterisk),
            '+' => Some(BulletGlyph::Plus),
            _ => None,
        }
    }

    /// The marker character.
    pub fn as_char(&self) -> char {
        match self {
            BulletGlyph::Dash => '-',
            BulletGlyph::Asterisk => '*',
            BulletGlyph::Plus => '+',
        }
    }

    /// Name used in messages and policy options.
    pub fn as_str(&self) -> &'static str {
        match self {
            BulletGlyph::Dash => "dash",
            BulletGlyph::Asterisk => "asterisk",
            BulletGlyph::Plus => "plus",
        }
    }
}

/// Marker of a list item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListMarker {
    /// Unordered item.
    Bullet(BulletGlyph),
    /// Ordered item, e.g. `3.` or `3)`.
    Ordered { number: u64, delimiter: char },
}

impl ListMarker {
    /// Whether this is an ordered marker.
    pub fn is_ordered(&self) -> bool {
        matches!(self, ListMarker::Ordered { .. })
    }

    /// Whether an item with `other` can continue a list opened by this marker.
    ///
    /// Bullets must share a glyph and ordered items a delimiter.
    pub fn same_list(&self, other: &ListMarker) -> bool {
        match (self, other) {
            (ListMarker::Bullet(a), ListMarker::Bullet(b)) => a == b,
            (
                ListMarker::Ordered { delimiter: a, .. },
                ListMarker::Ordered { delimiter: b, .. },
            ) => a == b,
            _ => false,
        }
    }
}

/// A list item node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
    /// Line of the marker.
    pub line: usize,
    /// Column of the marker (1-indexed).
    pub column: usize,
    /// Width of the leading whitespace, tabs expanded to 4 columns.
    pub indent: usize,
    /// Nesting depth; top-level items are 0.
    pub depth: usize,
    /// Identifier of the list this item belongs to. Items of one list share it.
    pub list: usize,
    /// The item marker.
    pub marker: ListMarker,
}

/// A fenced code block node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBlock {
    /// Line of the opening fence.
    pub line: usize,
    /// Line of the closing fence, or the last line of an unterminated block.
    pub end_line: usize,
    /// Info string after the opening fence.
    pub info: Option<String>,
}

/// A block-level node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading(Heading),
    ListItem(ListItem),
    CodeBlock(CodeBlock),
    ThematicBreak { line: usize },
}

impl Block {
    /// First source line of the block.
    pub fn line(&self) -> usize {
        match self {
            Block::Heading(h) => h.line,
            Block::ListItem(item) => item.line,
            Block::CodeBlock(code) => code.line,
            Block::ThematicBreak { line } => *line,
        }
    }
}

/// A fully materialised Markdown document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    lines: Vec<Line>,
    blocks: Vec<Block>,
}

impl Document {
    /// Scan Markdown source into a document.
    pub fn parse(source: &str) -> Self {
        scan::scan(source)
    }

    /// Assemble a document from lines and blocks produced elsewhere.
    ///
    /// Blocks are kept in source order.
    pub fn from_parts(lines: Vec<Line>, mut blocks: Vec<Block>) -> Self {
        blocks.sort_by_key(Block::line);
        Self { lines, blocks }
    }

    /// All source lines.
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Lines outside code blocks.
    pub fn text_lines(&self) -> impl Iterator<Item = &Line> {
        self.lines.iter().filter(|line| !line.in_code)
    }

    /// All blocks in source order.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Headings in source order.
    pub fn headings(&self) -> impl Iterator<Item = &Heading> {
        self.blocks.iter().filter_map(|block| match block {
            Block::Heading(h) => Some(h),
            _ => None,
        })
    }

    /// List items in source order.
    pub fn list_items(&self) -> impl Iterator<Item = &ListItem> {
        self.blocks.iter().filter_map(|block| match block {
            Block::ListItem(item) => Some(item),
            _ => None,
        })
    }

    /// Fenced code blocks in source order.
    pub fn code_blocks(&self) -> impl Iterator<Item = &CodeBlock> {
        self.blocks.iter().filter_map(|block| match block {
            Block::CodeBlock(code) => Some(code),
            _ => None,
        })
    }

    /// Whether the document has no content at all.
    pub fn is_empty(&self) -> bool {
        self.lines.iter().all(Line::is_blank)
    }
}
