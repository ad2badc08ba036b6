//! Text assembler
//!
//! Joins fragments with single spaces, closes paused fragments with a period
//! and normalizes whitespace. Pure: the same fragments always assemble to the
//! same string.

use crate::speakable::SpeakableFragment;

const SENTENCE_END: [char; 3] = ['.', '!', '?'];

/// Join fragments into a whitespace-normalized string
///
/// A paused fragment with text gets a trailing period. A pause-only fragment
/// closes the previous sentence unless nothing precedes it or the output
/// already ends a sentence.
pub fn assemble(fragments: &[SpeakableFragment]) -> String {
    let mut out = String::new();

    for fragment in fragments {
        let text = fragment.text().trim();
        if text.is_empty() {
            if fragment.has_pause() && !out.is_empty() && !out.ends_with(SENTENCE_END) {
                out.push('.');
            }
            continue;
        }

        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(text);
        if fragment.has_pause() {
            out.push('.');
        }
    }

    collapse_whitespace(&out)
}

/// Collapse every run of whitespace to one space and trim both ends
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
