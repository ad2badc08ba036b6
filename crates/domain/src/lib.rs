//! Domain layer for speakmark
//!
//! Turns markdown into the text a speech synthesizer should read aloud:
//! prose is kept, code, raw HTML and images are dropped, and headings,
//! list items and rules become spoken pauses.
//!
//! This layer is synchronous and performs no I/O.

pub mod assembler;
pub mod errors;
pub mod extractor;
pub mod node;
pub mod speakable;
pub mod tokenizer;

pub use errors::DomainError;
pub use node::{Node, NodeKind};
pub use speakable::{SpeakableFragment, SpeakableText};

/// Extract the speakable text of a markdown document
///
/// # Errors
///
/// Returns [`DomainError::NoSpeakableContent`] when nothing readable remains,
/// for example a document holding only a code block.
pub fn speakable_text(markdown: &str) -> Result<SpeakableText, DomainError> {
    SpeakableText::from_markdown(markdown)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn speak(markdown: &str) -> String {
        speakable_text(markdown).unwrap().into_inner()
    }

    #[test]
    fn heading_then_paragraph() {
        assert_eq!(speak("## Title\n\nBody"), "Title. Body");
    }

    #[test]
    fn rule_between_paragraphs() {
        assert_eq!(speak("A\n\n---\n\nB"), "A. B");
    }

    #[test]
    fn bullet_list() {
        assert_eq!(speak("- One\n- Two"), "One. Two.");
    }

    #[test]
    fn end_to_end_scenario() {
        let markdown = "# Hi\n\nThis is `code` and a [link](http://x).\n\n```\nskip me\n```";
        assert_eq!(speak(markdown), "Hi. This is and a link.");
    }

    #[test]
    fn nested_list() {
        assert_eq!(
            speak("1. First\n   - sub one\n   - sub two\n2. Second"),
            "First. sub one. sub two. Second."
        );
    }

    #[test]
    fn blockquote_keeps_text() {
        assert_eq!(speak("> Quoted *words*\n\nAfter"), "Quoted words After");
    }

    #[test]
    fn soft_breaks_become_spaces() {
        assert_eq!(speak("line one\nline two"), "line one line two");
    }

    #[test]
    fn image_alt_text_is_not_read() {
        assert_eq!(speak("See ![a diagram](d.png) here"), "See here");
    }

    #[test]
    fn inline_html_is_dropped() {
        assert_eq!(speak("Hello <b>bold</b> world"), "Hello bold world");
    }

    #[test]
    fn strikethrough_text_is_read() {
        assert_eq!(speak("~~old~~ new"), "old new");
    }

    #[test]
    fn tables_are_not_read() {
        assert_eq!(
            speak("Intro\n\n| a | b |\n|---|---|\n| 1 | 2 |\n\nEnd"),
            "Intro End"
        );
    }

    #[test]
    fn task_list_checkboxes_are_not_read() {
        assert_eq!(speak("- [ ] todo\n- [x] done"), "todo. done.");
    }

    #[test]
    fn code_only_documents_have_no_content() {
        for markdown in [
            "```\nfn main() {}\n```",
            "    indented code",
            "<div>\n<p>html</p>\n</div>",
            "![alt](image.png)",
            "| a |\n|---|\n| 1 |",
            "`just code`",
            "---",
            "",
        ] {
            assert_eq!(
                speakable_text(markdown),
                Err(DomainError::NoSpeakableContent),
                "input: {markdown:?}"
            );
        }
    }

    #[test]
    fn extraction_is_idempotent() {
        let markdown = "# A\n\n* b\n* c\n\n> d\n\n---\n\ne";
        assert_eq!(speakable_text(markdown), speakable_text(markdown));
    }
}
