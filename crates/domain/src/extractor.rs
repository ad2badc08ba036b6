//! Speakable-text extractor
//!
//! One pure function per node kind. Block functions return fragments;
//! inline content is flattened to a string by [`inline_text`].
//!
//! | kind | contributes |
//! |---|---|
//! | paragraph | inline text, no pause |
//! | heading | inline text, pause |
//! | list | one paused fragment per item, nested lists flattened in order |
//! | blockquote | assembled text of its blocks, no pause |
//! | horizontal rule | a pause only |
//! | code block, raw html, table, image, inline code | nothing |
//! | line break | a single space |

use crate::{assembler::assemble, node::Node, speakable::SpeakableFragment};

/// Extract fragments from a sequence of block nodes, in document order
pub fn extract(nodes: &[Node]) -> Vec<SpeakableFragment> {
    nodes.iter().flat_map(extract_block).collect()
}

/// Extract fragments from one block node
pub fn extract_block(node: &Node) -> Vec<SpeakableFragment> {
    match node {
        Node::Paragraph(children) => paragraph(children),
        Node::Heading { children, .. } => heading(children),
        Node::List { items, .. } => list(items),
        Node::ListItem(children) => list_item(children),
        Node::BlockQuote(children) => blockquote(children),
        Node::HorizontalRule => horizontal_rule(),
        Node::CodeBlock(_) | Node::RawHtml(_) | Node::Table(_) | Node::Image { .. } => Vec::new(),
        // Inline content found at block level reads like a paragraph
        inline => fragment(inline_text(inline), false),
    }
}

pub fn paragraph(children: &[Node]) -> Vec<SpeakableFragment> {
    fragment(inline_texts(children), false)
}

pub fn heading(children: &[Node]) -> Vec<SpeakableFragment> {
    fragment(inline_texts(children), true)
}

pub fn list(items: &[Node]) -> Vec<SpeakableFragment> {
    items
        .iter()
        .flat_map(|item| match item {
            Node::ListItem(children) => list_item(children),
            other => extract_block(other),
        })
        .collect()
}

/// One paused fragment for the item's own text
///
/// A nested list flushes the text gathered so far, then contributes its own
/// items. Text after the nested list starts a new fragment.
pub fn list_item(children: &[Node]) -> Vec<SpeakableFragment> {
    let mut fragments = Vec::new();
    let mut own = String::new();

    for child in children {
        match child {
            Node::List { items, .. } => {
                fragments.extend(fragment(std::mem::take(&mut own), true));
                fragments.extend(list(items));
            },
            block if block.kind().is_block() => {
                own.push(' ');
                own.push_str(&assemble(&extract_block(block)));
            },
            inline => own.push_str(&inline_text(inline)),
        }
    }

    fragments.extend(fragment(own, true));
    fragments
}

pub fn blockquote(children: &[Node]) -> Vec<SpeakableFragment> {
    fragment(assemble(&extract(children)), false)
}

pub fn horizontal_rule() -> Vec<SpeakableFragment> {
    vec![SpeakableFragment::pause_only()]
}

/// Spoken text of an inline node
pub fn inline_text(node: &Node) -> String {
    match node {
        Node::Text(text) => text.clone(),
        Node::Strong(children)
        | Node::Emphasis(children)
        | Node::Strikethrough(children)
        | Node::Link { children, .. } => inline_texts(children),
        Node::LineBreak => " ".to_string(),
        Node::InlineCode(_) | Node::Image { .. } | Node::RawHtml(_) => String::new(),
        block => assemble(&extract_block(block)),
    }
}

fn inline_texts(nodes: &[Node]) -> String {
    nodes.iter().map(inline_text).collect()
}

fn fragment(text: String, pause: bool) -> Vec<SpeakableFragment> {
    let text = text.trim();
    if text.is_empty() {
        Vec::new()
    } else {
        vec![SpeakableFragment::new(text, pause)]
    }
}
