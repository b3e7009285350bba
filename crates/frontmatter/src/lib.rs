//! Front-matter wire support for blog posts.
//!
//! This crate translates between the on-disk post format (a `---` fenced YAML header followed by
//! a Markdown body) and a plain wire model. It knows nothing about validation, ordering or
//! filtering; those live in `posts-core`.
//!
//! On-disk layout written by [`write_post_markdown`]:
//!
//! ```text
//! ---
//! title: <string>
//! date: <YYYY-MM-DD HH:mm:ss>
//! categories: [<comma,joined,values>]
//! tags: [<comma,joined,values>]
//! ---
//!
//! <body text>
//! ```

mod document;
mod header;

pub use document::{read_post_markdown, write_post_markdown, FrontMatter, PostDocument};

use thiserror::Error;

/// Errors returned by the front-matter boundary crate.
#[derive(Debug, Error)]
pub enum FrontMatterError {
    #[error("missing front matter header (expected '---' as first line)")]
    MissingFrontMatter,

    #[error("unterminated front matter (missing closing '---' line)")]
    UnterminatedFrontMatter,

    #[error("invalid YAML: {0}")]
    InvalidYaml(#[from] serde_yaml::Error),

    #[error("front matter must be a YAML mapping")]
    FrontMatterNotMapping,

    #[error("failed to render front matter value: {0}")]
    Render(#[from] serde_json::Error),
}
