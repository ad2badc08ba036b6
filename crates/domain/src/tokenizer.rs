//! Markdown tokenizer
//!
//! Drives `pulldown-cmark` and folds its flat event stream into a [`Node`]
//! tree. Tables fold into a single [`Node::Table`] and task-list checkboxes
//! are dropped. Other constructs outside the closed node set (footnotes,
//! table rows and cells) are transparent: their children are spliced into
//! the parent.

use pulldown_cmark::{Event, Options, Parser, Tag};

use crate::node::Node;

/// Open container waiting for its end event
#[derive(Debug)]
enum Frame {
    Root,
    Paragraph,
    Heading(u8),
    List(bool),
    Item,
    BlockQuote,
    CodeBlock,
    HtmlBlock,
    Table,
    Image(String),
    Strong,
    Emphasis,
    Strikethrough,
    Link(String),
    Transparent,
}

#[derive(Debug)]
struct Open {
    frame: Frame,
    children: Vec<Node>,
    literal: String,
}

impl Open {
    const fn new(frame: Frame) -> Self {
        Self {
            frame,
            children: Vec::new(),
            literal: String::new(),
        }
    }

    const fn collects_literal(&self) -> bool {
        matches!(self.frame, Frame::CodeBlock | Frame::HtmlBlock)
    }

    /// Close this container, yielding the nodes it contributes to its parent
    fn close(self) -> Vec<Node> {
        let node = match self.frame {
            Frame::Root | Frame::Transparent => return self.children,
            Frame::Paragraph => Node::Paragraph(self.children),
            Frame::Heading(level) => Node::Heading {
                level,
                children: self.children,
            },
            Frame::List(ordered) => Node::List {
                ordered,
                items: self.children,
            },
            Frame::Item => Node::ListItem(self.children),
            Frame::BlockQuote => Node::BlockQuote(self.children),
            Frame::CodeBlock => Node::CodeBlock(self.literal),
            Frame::HtmlBlock => Node::RawHtml(self.literal),
            Frame::Table => Node::Table(self.children),
            Frame::Image(url) => Node::Image {
                url,
                alt: self.children,
            },
            Frame::Strong => Node::Strong(self.children),
            Frame::Emphasis => Node::Emphasis(self.children),
            Frame::Strikethrough => Node::Strikethrough(self.children),
            Frame::Link(url) => Node::Link {
                url,
                children: self.children,
            },
        };
        vec![node]
    }
}

fn frame_for(tag: Tag<'_>) -> Frame {
    match tag {
        Tag::Paragraph => Frame::Paragraph,
        Tag::Heading { level, .. } => Frame::Heading(level as u8),
        Tag::List(start) => Frame::List(start.is_some()),
        Tag::Item => Frame::Item,
        Tag::BlockQuote(_) => Frame::BlockQuote,
        Tag::CodeBlock(_) => Frame::CodeBlock,
        Tag::HtmlBlock => Frame::HtmlBlock,
        Tag::Table(_) => Frame::Table,
        Tag::Image { dest_url, .. } => Frame::Image(dest_url.into_string()),
        Tag::Strong => Frame::Strong,
        Tag::Emphasis => Frame::Emphasis,
        Tag::Strikethrough => Frame::Strikethrough,
        Tag::Link { dest_url, .. } => Frame::Link(dest_url.into_string()),
        _ => Frame::Transparent,
    }
}

/// GitHub-flavored extensions the tokenizer understands
fn options() -> Options {
    Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES | Options::ENABLE_TASKLISTS
}

/// Parse markdown into a sequence of top-level block nodes
pub fn parse(markdown: &str) -> Vec<Node> {
    let parser = Parser::new_ext(markdown, options());
    let mut stack = vec![Open::new(Frame::Root)];

    for event in parser {
        match event {
            Event::Start(tag) => stack.push(Open::new(frame_for(tag))),
            Event::End(_) => {
                // The root frame is never popped by an end event
                if stack.len() > 1 {
                    if let Some(open) = stack.pop() {
                        push_nodes(&mut stack, open.close());
                    }
                }
            },
            Event::Text(text) => {
                if let Some(top) = stack.last_mut() {
                    if top.collects_literal() {
                        top.literal.push_str(&text);
                    } else {
                        top.children.push(Node::Text(text.into_string()));
                    }
                }
            },
            Event::Html(html) => {
                if let Some(top) = stack.last_mut() {
                    if top.collects_literal() {
                        top.literal.push_str(&html);
                    } else {
                        top.children.push(Node::RawHtml(html.into_string()));
                    }
                }
            },
            Event::InlineHtml(html) => push_nodes(&mut stack, vec![Node::RawHtml(html.into_string())]),
            Event::Code(code) => push_nodes(&mut stack, vec![Node::InlineCode(code.into_string())]),
            Event::SoftBreak => push_nodes(&mut stack, vec![Node::text("\n")]),
            Event::HardBreak => push_nodes(&mut stack, vec![Node::LineBreak]),
            Event::Rule => push_nodes(&mut stack, vec![Node::HorizontalRule]),
            // `[ ]` / `[x]` is markup, not content
            Event::TaskListMarker(_) => {},
            _ => {},
        }
    }

    // Unbalanced input cannot come out of the parser, but fold defensively
    while stack.len() > 1 {
        if let Some(open) = stack.pop() {
            push_nodes(&mut stack, open.close());
        }
    }

    stack.pop().map(Open::close).unwrap_or_default()
}

fn push_nodes(stack: &mut [Open], nodes: Vec<Node>) {
    if let Some(top) = stack.last_mut() {
        top.children.extend(nodes);
    }
}
