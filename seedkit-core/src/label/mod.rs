//! Tag-embedded label annotations.
//!
//! Labels carry free text plus `#tag` tokens, e.g. `"rent payment #kyc"`.
//! A marker only counts when it sits at the start of the string or after
//! whitespace and is followed by a non-whitespace token.

pub mod bip329;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelRecord {
    pub text: String,
    pub tags: Vec<String>,
}

impl LabelRecord {
    pub fn new(text: impl Into<String>, tags: Vec<String>) -> Self {
        Self {
            text: text.into(),
            tags,
        }
    }
}

/// Parse a raw label into text and tags.
///
/// Everything before the first marker, trimmed, becomes the text. Tags keep
/// their left-to-right order and duplicates are preserved as given.
pub fn parse(raw: &str) -> LabelRecord {
    let mut tags = Vec::new();
    let mut text_end: Option<usize> = None;
    let mut at_boundary = true;

    let mut chars = raw.char_indices().peekable();
    while let Some((index, ch)) = chars.next() {
        if ch == '#' && at_boundary {
            if matches!(chars.peek(), Some(&(_, next)) if !next.is_whitespace()) {
                if text_end.is_none() {
                    text_end = Some(index);
                }
                let mut tag = String::new();
                while let Some(&(_, next)) = chars.peek() {
                    if next.is_whitespace() {
                        break;
                    }
                    tag.push(next);
                    chars.next();
                }
                tags.push(tag);
                at_boundary = false;
                continue;
            }
        }
        at_boundary = ch.is_whitespace();
    }

    let text = match text_end {
        Some(end) => raw[..end].trim(),
        None => raw.trim(),
    };

    LabelRecord {
        text: text.to_string(),
        tags,
    }
}

/// Format a record back into its raw form.
///
/// `parse(format(r)) == r` holds for any record whose text does not itself
/// contain a `#token` pattern and whose tags are free of whitespace and `#`.
pub fn format(record: &LabelRecord) -> String {
    let mut out = record.text.clone();
    for tag in &record.tags {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push('#');
        out.push_str(tag);
    }
    out
}
