//! Content-store client and structured-content formatting.
//!
//! The content store is an external headless CMS reached over HTTP; this
//! crate owns the only client for it, plus the formatter that turns flat
//! draft text into the store's rich-text block shape.

pub mod blocks;
pub mod client;

pub use blocks::to_blocks;
pub use client::{ContentStore, ContentStoreClient, ContentStoreError};
