use posts_frontmatter::FrontMatterError;

#[derive(Debug, thiserror::Error)]
pub enum PostError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("post id missing")]
    MissingId,
    #[error("invalid post id: {0}")]
    InvalidId(String),
    #[error("post not found: {0}")]
    NotFound(String),
    #[error("post already exists: {0}")]
    Conflict(String),
    #[error("failed to read posts directory: {0}")]
    DirRead(std::io::Error),
    #[error("failed to read post file: {0}")]
    FileRead(std::io::Error),
    #[error("failed to write post file: {0}")]
    FileWrite(std::io::Error),
    #[error("failed to delete post file: {0}")]
    FileDelete(std::io::Error),
    #[error("failed to serialize post: {0}")]
    Serialization(#[from] FrontMatterError),
}

/// Broad error classes that callers map onto their own transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Conflict,
    Storage,
}

impl PostError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PostError::InvalidInput(_) | PostError::MissingId | PostError::InvalidId(_) => {
                ErrorKind::Validation
            }
            PostError::NotFound(_) => ErrorKind::NotFound,
            PostError::Conflict(_) => ErrorKind::Conflict,
            PostError::DirRead(_)
            | PostError::FileRead(_)
            | PostError::FileWrite(_)
            | PostError::FileDelete(_)
            | PostError::Serialization(_) => ErrorKind::Storage,
        }
    }
}

pub type PostResult<T> = std::result::Result<T, PostError>;
