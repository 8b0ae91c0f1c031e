//! Content Formatter: flat draft text to rich-text blocks.
//!
//! Paragraphs are blank-line delimited. Block and span `_key`s are unique
//! identifiers only; ordering is carried by array position.

use pressroom_core::{Block, Span};
use uuid::Uuid;

/// Unique short key for a block or span.
fn short_key() -> String {
    Uuid::new_v4().simple().to_string()[..12].to_string()
}

/// Convert draft text into ordered rich-text blocks.
///
/// Empty paragraphs are discarded; empty input yields zero blocks, which is
/// a valid content body (a draft that could not be generated).
pub fn to_blocks(text: &str) -> Vec<Block> {
    text.replace("\r\n", "\n")
        .split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|paragraph| Block {
            block_type: "block".to_string(),
            key: short_key(),
            style: "normal".to_string(),
            mark_defs: Vec::new(),
            children: vec![Span {
                span_type: "span".to_string(),
                key: short_key(),
                text: paragraph.to_string(),
                marks: Vec::new(),
            }],
        })
        .collect()
}
