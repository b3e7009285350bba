//! Input validation utilities.
//!
//! This module contains functions for validating caller input before it is serialized or used
//! to address storage.

use crate::{PostError, PostFields, PostResult};
use posts_types::NonEmptyText;

/// Message returned when a write is missing its title or content.
pub const REQUIRED_FIELDS_MESSAGE: &str = "title and content are required";

/// Checks that a post about to be written has a title and content.
///
/// Both must contain at least one non-whitespace character. Dates, categories and tags are not
/// checked; unreadable dates are dropped when the post is serialized.
///
/// Returns the trimmed title, which new post ids are derived from.
///
/// # Errors
///
/// Returns `PostError::InvalidInput` carrying [`REQUIRED_FIELDS_MESSAGE`].
pub fn validate_for_write(fields: &PostFields) -> PostResult<NonEmptyText> {
    let required = || PostError::InvalidInput(REQUIRED_FIELDS_MESSAGE.into());
    let title = NonEmptyText::new(&fields.title).map_err(|_| required())?;
    NonEmptyText::new(&fields.content).map_err(|_| required())?;
    Ok(title)
}

/// Validates that a post id is safe to use as a single file name.
///
/// Ids are storage file names. This rejects anything that could address a file outside the
/// posts directory or collide with temporary files:
/// - empty ids
/// - path separators and NUL
/// - `.`/`..` and other dot-prefixed names
///
/// # Errors
///
/// Returns `PostError::MissingId` for an empty id and `PostError::InvalidId` otherwise.
pub fn validate_post_id(id: &str) -> PostResult<()> {
    if id.is_empty() {
        return Err(PostError::MissingId);
    }

    if id.starts_with('.') || id.contains(['/', '\\', '\0']) {
        return Err(PostError::InvalidId(id.to_string()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(title: &str, content: &str) -> PostFields {
        PostFields {
            title: title.into(),
            content: content.into(),
            ..Default::default()
        }
    }

    #[test]
    fn accepts_title_and_content() {
        let title = validate_for_write(&fields("  A ", "B")).unwrap();
        assert_eq!(title.as_str(), "A");
    }

    #[test]
    fn rejects_missing_title_or_content() {
        for (title, content) in [("", "x"), ("x", ""), ("   ", "x"), ("x", "\n\t")] {
            let err = validate_for_write(&fields(title, content)).expect_err("should reject");
            assert!(
                matches!(err, PostError::InvalidInput(ref msg) if msg == REQUIRED_FIELDS_MESSAGE)
            );
        }
    }

    #[test]
    fn tolerates_malformed_dates() {
        let mut f = fields("A", "B");
        f.date = Some("not a date".into());
        assert!(validate_for_write(&f).is_ok());
    }

    #[test]
    fn post_ids_must_be_plain_file_names() {
        assert!(validate_post_id("hello-1700000000000.md").is_ok());
        assert!(validate_post_id("你好.md").is_ok());
        assert!(matches!(validate_post_id(""), Err(PostError::MissingId)));
        for bad in ["..", ".", "../etc/passwd", "a/b.md", "a\\b.md", ".hidden.md", "a\0b"] {
            assert!(
                matches!(validate_post_id(bad), Err(PostError::InvalidId(_))),
                "{bad:?} should be rejected"
            );
        }
    }
}
