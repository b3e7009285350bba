//! Post records.

use posts_types::PublishedAt;
use serde::{Deserialize, Serialize};

/// A parsed post, as listed to callers.
///
/// `date` serializes as `YYYY-MM-DD HH:mm:ss`, or as an empty string when the post has none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub title: String,
    pub date: PublishedAt,
    pub categories: Vec<String>,
    pub tags: Vec<String>,
    pub content: String,
}

/// Caller-provided fields for creating or replacing a post.
///
/// `date` is free text; it is normalized (or dropped when unreadable) on serialize.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostFields {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub categories: Option<Vec<String>>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

impl Post {
    /// The fields that would reproduce this post when serialized.
    pub fn to_fields(&self) -> PostFields {
        PostFields {
            title: self.title.clone(),
            content: self.content.clone(),
            date: self.date.is_set().then(|| self.date.to_string()),
            categories: Some(self.categories.clone()),
            tags: Some(self.tags.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_serializes_to_list_shape() {
        let post = Post {
            id: "hello.md".into(),
            title: "Hello".into(),
            date: PublishedAt::parse("2023-01-01 10:00:00").unwrap(),
            categories: vec!["tech".into()],
            tags: vec![],
            content: "Body".into(),
        };
        let json = serde_json::to_value(&post).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "hello.md",
                "title": "Hello",
                "date": "2023-01-01 10:00:00",
                "categories": ["tech"],
                "tags": [],
                "content": "Body"
            })
        );
    }

    #[test]
    fn fields_deserialize_with_optional_keys_missing() {
        let fields: PostFields =
            serde_json::from_str(r#"{"title":"A","content":"B"}"#).unwrap();
        assert_eq!(fields.title, "A");
        assert!(fields.date.is_none());
        assert!(fields.categories.is_none());
        assert!(fields.tags.is_none());
    }
}
