//! # Storage Layer
//!
//! The [`PostStore`] trait is the seam between the pure document logic and wherever post files
//! actually live. The core hands it ids and raw text only; parsing, validation and ordering
//! never touch storage.
//!
//! ## Implementations
//!
//! - [`FsPostStore`]: one file per post inside a directory (a Hexo `source/_posts` folder).
//! - [`MemPostStore`]: a map in memory, for tests and dry runs.
//!
//! ## Ids
//!
//! A post id is its file name, extension included. Ids are opaque to the codec; stores reject
//! ids that are not a single plain path component
//! (see [`crate::validation::validate_post_id`]).

use crate::PostResult;

pub mod fs;
pub mod memory;

pub use fs::FsPostStore;
pub use memory::MemPostStore;

/// A stored post before parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPost {
    pub id: String,
    pub content: String,
}

/// Abstract interface for raw post storage.
///
/// Implementations must be shareable across request handlers.
pub trait PostStore: Send + Sync {
    /// List every stored post, sorted by ascending id.
    fn list_raw(&self) -> PostResult<Vec<RawPost>>;

    /// Read one post. Returns `Ok(None)` if the id is unknown.
    fn read_raw(&self, id: &str) -> PostResult<Option<String>>;

    /// Whether a post with this id exists.
    fn contains(&self, id: &str) -> PostResult<bool> {
        Ok(self.read_raw(id)?.is_some())
    }

    /// Store a new post.
    /// Fails with `PostError::Conflict` if the id is already taken; never overwrites.
    fn create_raw(&self, id: &str, content: &str) -> PostResult<()>;

    /// Replace an existing post.
    /// Fails with `PostError::NotFound` if the id is unknown.
    fn write_raw(&self, id: &str, content: &str) -> PostResult<()>;

    /// Remove a post.
    /// Fails with `PostError::NotFound` if the id is unknown.
    fn delete_raw(&self, id: &str) -> PostResult<()>;
}
