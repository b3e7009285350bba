//! List-time filtering.
//!
//! Raw query parameters are normalized once per request into a [`QueryCondition`], which is then
//! applied to the parsed collection. An absent or empty parameter means "no constraint".

use crate::Post;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Query parameters as received at the boundary, before normalization.
///
/// Only `title`, `categories` and `tags` are interpreted; `categories` and `tags` are
/// comma-joined lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawQueryParams {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub categories: Option<String>,
    #[serde(default)]
    pub tags: Option<String>,
}

impl RawQueryParams {
    /// Collects parameters from query-string pairs.
    ///
    /// A key given more than once has its values joined with `,`, so `?tags=a&tags=b` reads the
    /// same as `?tags=a,b`. Unknown keys are ignored.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_ref() {
                "title" => &mut params.title,
                "categories" => &mut params.categories,
                "tags" => &mut params.tags,
                _ => continue,
            };
            let value = value.into();
            match slot {
                Some(existing) => {
                    existing.push(',');
                    existing.push_str(&value);
                }
                None => *slot = Some(value),
            }
        }
        params
    }
}

/// Normalized filter criteria. Every present field must match (AND semantics).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryCondition {
    /// Lowercase substring the lowercased title must contain.
    pub title: Option<String>,
    /// Lowercase categories that must all be present on the post.
    pub categories: Option<BTreeSet<String>>,
    /// Lowercase tags that must all be present on the post.
    pub tags: Option<BTreeSet<String>>,
}

impl QueryCondition {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.categories.is_none() && self.tags.is_none()
    }

    /// Whether `post` satisfies every present constraint.
    ///
    /// Required categories and tags are compared exactly against the stored values; only the
    /// title comparison folds the post's case.
    pub fn matches(&self, post: &Post) -> bool {
        if let Some(needle) = &self.title {
            if !post.title.to_lowercase().contains(needle.as_str()) {
                return false;
            }
        }
        if let Some(required) = &self.categories {
            if !contains_all(&post.categories, required) {
                return false;
            }
        }
        if let Some(required) = &self.tags {
            if !contains_all(&post.tags, required) {
                return false;
            }
        }
        true
    }
}

fn contains_all(values: &[String], required: &BTreeSet<String>) -> bool {
    required.iter().all(|r| values.iter().any(|v| v == r))
}

/// Builds a [`QueryCondition`] from raw parameters.
///
/// Values are lowercased. `categories` and `tags` are split on `,`; pieces are trimmed and empty
/// pieces dropped. A parameter that is absent, empty, or splits into nothing is omitted from
/// the condition rather than becoming an empty constraint.
pub fn build_condition(params: &RawQueryParams) -> QueryCondition {
    QueryCondition {
        title: params
            .title
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .map(str::to_lowercase),
        categories: params.categories.as_deref().and_then(split_list),
        tags: params.tags.as_deref().and_then(split_list),
    }
}

fn split_list(value: &str) -> Option<BTreeSet<String>> {
    let set: BTreeSet<String> = value
        .to_lowercase()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();
    (!set.is_empty()).then_some(set)
}

/// Keeps the posts that satisfy `condition`, preserving their order.
pub fn filter_posts(posts: Vec<Post>, condition: &QueryCondition) -> Vec<Post> {
    if condition.is_empty() {
        return posts;
    }
    posts.into_iter().filter(|p| condition.matches(p)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use posts_types::PublishedAt;

    fn post(id: &str, title: &str, cats: &[&str], tags: &[&str]) -> Post {
        Post {
            id: id.into(),
            title: title.into(),
            date: PublishedAt::UNSET,
            categories: cats.iter().map(|s| s.to_string()).collect(),
            tags: tags.iter().map(|s| s.to_string()).collect(),
            content: "body".into(),
        }
    }

    fn params(title: Option<&str>, categories: Option<&str>, tags: Option<&str>) -> RawQueryParams {
        RawQueryParams {
            title: title.map(Into::into),
            categories: categories.map(Into::into),
            tags: tags.map(Into::into),
        }
    }

    fn ids(posts: &[Post]) -> Vec<&str> {
        posts.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn build_lowercases_and_splits() {
        let cond = build_condition(&params(Some("HeLLo"), Some("Tech, LIFE"), Some("a,,b,")));
        assert_eq!(cond.title.as_deref(), Some("hello"));
        assert_eq!(
            cond.categories,
            Some(BTreeSet::from(["tech".to_string(), "life".to_string()]))
        );
        assert_eq!(
            cond.tags,
            Some(BTreeSet::from(["a".to_string(), "b".to_string()]))
        );
    }

    #[test]
    fn build_omits_absent_and_empty_params() {
        let cond = build_condition(&params(Some("  "), Some(""), Some(" , ")));
        assert!(cond.is_empty());
        assert!(build_condition(&RawQueryParams::default()).is_empty());
    }

    #[test]
    fn categories_are_a_conjunction() {
        let posts = vec![
            post("1", "one", &["tech", "life"], &[]),
            post("2", "two", &["life"], &[]),
        ];

        let both = build_condition(&params(None, Some("tech,life"), None));
        assert_eq!(ids(&filter_posts(posts.clone(), &both)), vec!["1"]);

        let unconstrained = build_condition(&params(None, Some(""), None));
        assert_eq!(ids(&filter_posts(posts, &unconstrained)), vec!["1", "2"]);
    }

    #[test]
    fn title_match_is_case_insensitive_substring() {
        let posts = vec![post("1", "hello world", &[], &[]), post("2", "goodbye", &[], &[])];
        let cond = build_condition(&params(Some("HELLO"), None, None));
        assert_eq!(ids(&filter_posts(posts, &cond)), vec!["1"]);
    }

    #[test]
    fn tags_match_stored_values_exactly() {
        let posts = vec![
            post("1", "a", &[], &["rust", "web"]),
            post("2", "b", &[], &["Rust"]),
            post("3", "c", &[], &["rustacean"]),
        ];
        let cond = build_condition(&params(None, None, Some("RUST")));
        assert_eq!(ids(&filter_posts(posts, &cond)), vec!["1"]);
    }

    #[test]
    fn all_conditions_must_hold_and_order_is_kept() {
        let posts = vec![
            post("3", "Rust tips", &["tech"], &["rust"]),
            post("1", "Rust news", &["tech"], &["news"]),
            post("2", "Rust tricks", &["tech"], &["rust"]),
        ];
        let cond = build_condition(&params(Some("rust"), Some("tech"), Some("rust")));
        assert_eq!(ids(&filter_posts(posts, &cond)), vec!["3", "2"]);
    }

    #[test]
    fn posts_without_lists_fail_list_constraints() {
        let posts = vec![post("1", "bare", &[], &[])];
        let cond = build_condition(&params(None, Some("tech"), None));
        assert!(filter_posts(posts, &cond).is_empty());
    }

    #[test]
    fn from_pairs_joins_repeated_keys_and_ignores_others() {
        let params = RawQueryParams::from_pairs([
            ("tags", "a"),
            ("page", "2"),
            ("tags", "b"),
            ("title", "Hi"),
        ]);
        assert_eq!(params.tags.as_deref(), Some("a,b"));
        assert_eq!(params.title.as_deref(), Some("Hi"));
        assert!(params.categories.is_none());
    }
}
