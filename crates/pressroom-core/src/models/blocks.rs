use serde::{Deserialize, Serialize};

/// One rich-text span inside a block. Spans carry no marks here; the
/// pipeline emits plain paragraphs and editors add formatting in review.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Span {
    #[serde(rename = "_type")]
    pub span_type: String,
    #[serde(rename = "_key")]
    pub key: String,
    pub text: String,
    #[serde(default)]
    pub marks: Vec<String>,
}

/// One rich-text block in the structured content body. Block order is array
/// order; `_key` values are unique identifiers with no ordering semantics.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Block {
    #[serde(rename = "_type")]
    pub block_type: String,
    #[serde(rename = "_key")]
    pub key: String,
    pub style: String,
    #[serde(rename = "markDefs", default)]
    pub mark_defs: Vec<serde_json::Value>,
    pub children: Vec<Span>,
}
