//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into core services, so
//! request handling never reads process-wide environment variables.

use crate::constants::DEFAULT_POSTS_DIR;
use crate::{PostError, PostResult};
use std::path::{Path, PathBuf};

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    posts_dir: PathBuf,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Errors
    ///
    /// Returns `PostError::InvalidInput` if `posts_dir` is not an existing directory.
    pub fn new(posts_dir: PathBuf) -> PostResult<Self> {
        if !posts_dir.is_dir() {
            return Err(PostError::InvalidInput(format!(
                "posts directory does not exist: {}",
                posts_dir.display()
            )));
        }

        Ok(Self { posts_dir })
    }

    pub fn posts_dir(&self) -> &Path {
        &self.posts_dir
    }
}

/// Resolve the posts directory from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns [`DEFAULT_POSTS_DIR`].
pub fn posts_dir_from_env_value(value: Option<String>) -> PathBuf {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_POSTS_DIR))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_requires_existing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = CoreConfig::new(dir.path().to_path_buf()).unwrap();
        assert_eq!(cfg.posts_dir(), dir.path());

        let err = CoreConfig::new(dir.path().join("missing")).unwrap_err();
        assert!(matches!(err, PostError::InvalidInput(msg) if msg.contains("does not exist")));
    }

    #[test]
    fn posts_dir_falls_back_to_default() {
        assert_eq!(posts_dir_from_env_value(None), PathBuf::from(DEFAULT_POSTS_DIR));
        assert_eq!(
            posts_dir_from_env_value(Some("  ".into())),
            PathBuf::from(DEFAULT_POSTS_DIR)
        );
        assert_eq!(
            posts_dir_from_env_value(Some(" /srv/blog/_posts ".into())),
            PathBuf::from("/srv/blog/_posts")
        );
    }
}
