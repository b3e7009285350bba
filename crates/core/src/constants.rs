//! Constants used throughout the posts core crate.
//!
//! This module contains path and filename constants to ensure
//! consistency across the codebase and make maintenance easier.

/// Default directory for post storage when no explicit directory is configured.
pub const DEFAULT_POSTS_DIR: &str = "source/_posts";

/// File extension given to newly created posts.
pub const POST_FILE_EXTENSION: &str = "md";

/// Prefix for in-flight temporary files. Dot-files are never listed as posts.
pub const TEMP_FILE_PREFIX: &str = ".";

/// Suffix for in-flight temporary files.
pub const TEMP_FILE_SUFFIX: &str = ".tmp";
