//! Post document codec.
//!
//! Converts between raw post files and [`Post`] records. Parsing never fails: a file without a
//! readable header becomes a post with empty header fields whose content is the whole file.
//! Serializing writes the canonical layout described in `posts_frontmatter`.

use crate::{Post, PostFields, PostResult};
use posts_frontmatter::{read_post_markdown, write_post_markdown, FrontMatter, PostDocument};
use posts_types::PublishedAt;

/// Parses a raw post file into a [`Post`].
///
/// Missing header keys map to defaults: empty title, unset date, empty categories and tags. An
/// unreadable `date` is treated as unset. The current time is never substituted for a missing
/// date.
///
/// # Arguments
///
/// * `id` - Storage identifier of the post, carried through unchanged
/// * `raw` - Complete file contents
pub fn parse(id: impl Into<String>, raw: &str) -> Post {
    let id = id.into();

    let document = match read_post_markdown(raw) {
        Ok(document) => document,
        Err(e) => {
            tracing::debug!(post_id = %id, error = %e, "no readable front matter; using whole file as content");
            return Post {
                id,
                title: String::new(),
                date: PublishedAt::UNSET,
                categories: Vec::new(),
                tags: Vec::new(),
                content: raw.to_string(),
            };
        }
    };

    let FrontMatter {
        title,
        date,
        categories,
        tags,
    } = document.front_matter;

    let date = match date {
        Some(text) => PublishedAt::parse(&text).unwrap_or_else(|e| {
            tracing::warn!(post_id = %id, error = %e, "ignoring unreadable post date");
            PublishedAt::UNSET
        }),
        None => PublishedAt::UNSET,
    };

    Post {
        id,
        title: title.unwrap_or_default(),
        date,
        categories,
        tags,
        content: document.body,
    }
}

/// Serializes caller fields into the canonical raw post text.
///
/// Absent categories and tags are written as empty lists. The date goes through the same UTC
/// normalization as [`parse`]; an absent or unreadable date is written empty. Required fields
/// are not checked here, see [`crate::validation::validate_for_write`].
///
/// # Errors
///
/// Returns `PostError::Serialization` if a header value cannot be rendered.
pub fn serialize(fields: &PostFields) -> PostResult<String> {
    let date = match fields.date.as_deref() {
        Some(text) => PublishedAt::parse(text).unwrap_or_else(|e| {
            tracing::debug!(error = %e, "dropping unreadable date on write");
            PublishedAt::UNSET
        }),
        None => PublishedAt::UNSET,
    };

    let document = PostDocument {
        front_matter: FrontMatter {
            title: Some(fields.title.clone()),
            date: date.is_set().then(|| date.to_string()),
            categories: fields.categories.clone().unwrap_or_default(),
            tags: fields.tags.clone().unwrap_or_default(),
        },
        body: fields.content.clone(),
    };

    Ok(write_post_markdown(&document)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(title: &str, date: Option<&str>, cats: &[&str], tags: &[&str], content: &str) -> PostFields {
        PostFields {
            title: title.into(),
            content: content.into(),
            date: date.map(Into::into),
            categories: Some(cats.iter().map(|s| s.to_string()).collect()),
            tags: Some(tags.iter().map(|s| s.to_string()).collect()),
        }
    }

    #[test]
    fn serialize_writes_canonical_text() {
        let raw = serialize(&fields(
            "Hello",
            Some("2023-01-01T10:00:00Z"),
            &["tech", "life"],
            &["rust"],
            "Body",
        ))
        .unwrap();
        assert_eq!(
            raw,
            "---\ntitle: Hello\ndate: 2023-01-01 10:00:00\ncategories: [tech,life]\ntags: [rust]\n---\n\nBody\n"
        );
    }

    #[test]
    fn serialize_defaults_missing_lists_and_date() {
        let raw = serialize(&PostFields {
            title: "A".into(),
            content: "B".into(),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(raw, "---\ntitle: A\ndate: \ncategories: []\ntags: []\n---\n\nB\n");
    }

    #[test]
    fn serialize_drops_unreadable_date() {
        let raw = serialize(&fields("A", Some("someday"), &[], &[], "B")).unwrap();
        assert!(raw.contains("\ndate: \n"));
    }

    #[test]
    fn round_trip_preserves_fields_and_is_a_fixed_point() {
        let cases = [
            fields("Hello world", Some("2023-03-01 08:30:00"), &["tech", "life"], &["a b", "c"], "# Title\n\nSome *markdown*.\n"),
            fields("Rust: a review", Some("2023-03-01T08:30:00+02:00"), &[], &["1.0"], "x"),
            fields("null", None, &["a,b"], &[], "\nleading blank line"),
            fields("Body with rules", None, &[], &[], "before\n---\nafter\n---"),
            fields("中文标题", Some("2024/02/03 04:05:06"), &["生活"], &["随笔"], "正文"),
            fields("a\u{85}b", None, &["c\u{2028}d"], &["x\u{85}y", "p\u{2029}q"], "line\u{85}break"),
            fields("A: \u{2028}quoted\u{2029}", None, &[], &["a, \u{85}"], "x"),
        ];

        for input in cases {
            let raw = serialize(&input).unwrap();
            let post = parse("id.md", &raw);

            assert_eq!(post.id, "id.md");
            assert_eq!(post.title, input.title);
            assert_eq!(post.content, input.content);
            assert_eq!(Some(post.categories.clone()), input.categories);
            assert_eq!(Some(post.tags.clone()), input.tags);
            let expected_date = input
                .date
                .as_deref()
                .map(PublishedAt::parse_lenient)
                .unwrap_or_default();
            assert_eq!(post.date, expected_date);

            let again = serialize(&post.to_fields()).unwrap();
            assert_eq!(again, raw, "second pass must be a fixed point");
            assert_eq!(parse("id.md", &again), post);
        }
    }

    #[test]
    fn missing_date_parses_unset_not_now() {
        let post = parse("a.md", "---\ntitle: No date\ntags: [x]\n---\n\nBody\n");
        assert!(!post.date.is_set());
        assert_eq!(post.date.to_string(), "");
        assert_eq!(post.categories, Vec::<String>::new());
        assert_eq!(post.tags, vec!["x"]);
    }

    #[test]
    fn date_is_normalized_to_utc_on_parse() {
        let post = parse("a.md", "---\ntitle: T\ndate: 2023-06-01T12:00:00+08:00\n---\nx");
        assert_eq!(post.date.to_string(), "2023-06-01 04:00:00");
    }

    #[test]
    fn unreadable_date_parses_unset() {
        let post = parse("a.md", "---\ntitle: T\ndate: yesterday-ish\n---\nx");
        assert!(!post.date.is_set());
        assert_eq!(post.title, "T");
    }

    #[test]
    fn missing_delimiters_degrade_to_whole_body() {
        let raw = "just some notes\nwith no header";
        let post = parse("notes.md", raw);
        assert_eq!(post.title, "");
        assert!(!post.date.is_set());
        assert!(post.categories.is_empty());
        assert!(post.tags.is_empty());
        assert_eq!(post.content, raw);

        let unterminated = "---\ntitle: Lost\nbody without closing fence";
        assert_eq!(parse("x.md", unterminated).content, unterminated);
    }

    #[test]
    fn scalar_lists_become_sequences() {
        let post = parse("a.md", "---\ntitle: T\ncategories: solo\ntags:\n---\nx");
        assert_eq!(post.categories, vec!["solo"]);
        assert!(post.tags.is_empty());
    }
}
