//! Validated value types shared across the posts workspace.

mod published_at;

pub use published_at::{DateError, PublishedAt, CANONICAL_DATE_FORMAT};

#[derive(Debug, thiserror::Error)]
pub enum TextError {
    #[error("text is blank")]
    Blank,
}

/// Text with at least one non-whitespace character, stored trimmed.
///
/// Post titles and bodies must hold one of these before anything is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NonEmptyText(String);

impl NonEmptyText {
    /// # Errors
    ///
    /// Returns `TextError::Blank` if `input` is empty or whitespace only.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        match input.as_ref().trim() {
            "" => Err(TextError::Blank),
            trimmed => Ok(Self(trimmed.to_owned())),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
