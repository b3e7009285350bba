//! Collection ordering.

use crate::Post;

/// Sorts posts newest first.
///
/// Posts without a date sort as the earliest possible instant, so they sink to the end. The
/// sort is stable: posts with equal dates keep their incoming order, which for a store listing
/// is ascending id order.
pub fn order_by_date_desc(posts: &mut [Post]) {
    posts.sort_by(|a, b| b.date.cmp(&a.date));
}

#[cfg(test)]
mod tests {
    use super::*;
    use posts_types::PublishedAt;

    fn post(id: &str, date: &str) -> Post {
        Post {
            id: id.into(),
            title: id.into(),
            date: PublishedAt::parse_lenient(date),
            categories: vec![],
            tags: vec![],
            content: "x".into(),
        }
    }

    #[test]
    fn newest_first_with_unset_last() {
        let mut posts = vec![
            post("jan", "2023-01-01"),
            post("none", ""),
            post("mar", "2023-03-01"),
        ];
        order_by_date_desc(&mut posts);
        let ids: Vec<_> = posts.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["mar", "jan", "none"]);
    }

    #[test]
    fn ties_keep_incoming_order() {
        let mut posts = vec![
            post("b", "2023-01-01 10:00:00"),
            post("a", "2023-01-01 10:00:00"),
            post("y", ""),
            post("x", ""),
        ];
        order_by_date_desc(&mut posts);
        let ids: Vec<_> = posts.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a", "y", "x"]);
    }
}
