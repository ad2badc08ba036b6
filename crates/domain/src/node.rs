//! Markdown document tree
//!
//! A closed set of node kinds produced by the tokenizer and read by the
//! extractor. Block nodes own their children; inline nodes own either
//! inline children or a raw text payload.

use serde::Serialize;
use std::fmt;

/// A node in a parsed markdown document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A paragraph of inline content
    Paragraph(Vec<Self>),
    /// A heading of any level (1-6)
    Heading { level: u8, children: Vec<Self> },
    /// An ordered or bulleted list; every item is a [`Node::ListItem`]
    List { ordered: bool, items: Vec<Self> },
    /// A single list entry holding inline content and nested blocks
    ListItem(Vec<Self>),
    /// A block quotation
    BlockQuote(Vec<Self>),
    /// A thematic break (`---`)
    HorizontalRule,
    /// A fenced or indented code block with its literal contents
    CodeBlock(String),
    /// Raw HTML, either a block or an inline tag
    RawHtml(String),
    /// A table; children are the cell contents in row order
    Table(Vec<Self>),
    /// An image; `alt` holds the alt-text inline nodes
    Image { url: String, alt: Vec<Self> },
    /// Literal text
    Text(String),
    /// `**strong**`
    Strong(Vec<Self>),
    /// `*emphasis*`
    Emphasis(Vec<Self>),
    /// `~~strikethrough~~`
    Strikethrough(Vec<Self>),
    /// A link; `children` are the visible text
    Link { url: String, children: Vec<Self> },
    /// A hard line break
    LineBreak,
    /// `` `inline code` ``
    InlineCode(String),
}

/// The kind of a [`Node`], without its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Paragraph,
    Heading,
    List,
    ListItem,
    BlockQuote,
    HorizontalRule,
    CodeBlock,
    RawHtml,
    Table,
    Image,
    Text,
    Strong,
    Emphasis,
    Strikethrough,
    Link,
    LineBreak,
    InlineCode,
}

impl NodeKind {
    /// Whether this kind is a block-level container
    pub const fn is_block(self) -> bool {
        matches!(
            self,
            Self::Paragraph
                | Self::Heading
                | Self::List
                | Self::ListItem
                | Self::BlockQuote
                | Self::HorizontalRule
                | Self::CodeBlock
                | Self::RawHtml
                | Self::Table
        )
    }

    /// Stable lowercase name
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Paragraph => "paragraph",
            Self::Heading => "heading",
            Self::List => "list",
            Self::ListItem => "list_item",
            Self::BlockQuote => "block_quote",
            Self::HorizontalRule => "horizontal_rule",
            Self::CodeBlock => "code_block",
            Self::RawHtml => "raw_html",
            Self::Table => "table",
            Self::Image => "image",
            Self::Text => "text",
            Self::Strong => "strong",
            Self::Emphasis => "emphasis",
            Self::Strikethrough => "strikethrough",
            Self::Link => "link",
            Self::LineBreak => "line_break",
            Self::InlineCode => "inline_code",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Node {
    /// Shorthand for a text node
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text(content.into())
    }

    /// The kind of this node
    pub const fn kind(&self) -> NodeKind {
        match self {
            Self::Paragraph(_) => NodeKind::Paragraph,
            Self::Heading { .. } => NodeKind::Heading,
            Self::List { .. } => NodeKind::List,
            Self::ListItem(_) => NodeKind::ListItem,
            Self::BlockQuote(_) => NodeKind::BlockQuote,
            Self::HorizontalRule => NodeKind::HorizontalRule,
            Self::CodeBlock(_) => NodeKind::CodeBlock,
            Self::RawHtml(_) => NodeKind::RawHtml,
            Self::Table(_) => NodeKind::Table,
            Self::Image { .. } => NodeKind::Image,
            Self::Text(_) => NodeKind::Text,
            Self::Strong(_) => NodeKind::Strong,
            Self::Emphasis(_) => NodeKind::Emphasis,
            Self::Strikethrough(_) => NodeKind::Strikethrough,
            Self::Link { .. } => NodeKind::Link,
            Self::LineBreak => NodeKind::LineBreak,
            Self::InlineCode(_) => NodeKind::InlineCode,
        }
    }

    /// Child nodes, empty for leaves
    pub fn children(&self) -> &[Self] {
        match self {
            Self::Paragraph(children)
            | Self::Heading { children, .. }
            | Self::ListItem(children)
            | Self::BlockQuote(children)
            | Self::Table(children)
            | Self::Strong(children)
            | Self::Emphasis(children)
            | Self::Strikethrough(children)
            | Self::Link { children, .. } => children,
            Self::List { items, .. } => items,
            Self::Image { alt, .. } => alt,
            Self::HorizontalRule
            | Self::CodeBlock(_)
            | Self::RawHtml(_)
            | Self::Text(_)
            | Self::LineBreak
            | Self::InlineCode(_) => &[],
        }
    }
}
