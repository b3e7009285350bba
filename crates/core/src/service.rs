//! Post service.
//!
//! [`PostService`] is the single entry point the API surfaces use. It owns no state beyond the
//! injected [`PostStore`], so one instance can be shared across request handlers.

use crate::codec;
use crate::constants::POST_FILE_EXTENSION;
use crate::order::order_by_date_desc;
use crate::query::{build_condition, filter_posts};
use crate::validation::{validate_for_write, validate_post_id};
use crate::{CoreConfig, FsPostStore, Post, PostError, PostFields, PostResult, PostStore, RawQueryParams};
use chrono::{DateTime, Utc};
use std::sync::Arc;

#[derive(Clone)]
pub struct PostService {
    store: Arc<dyn PostStore>,
}

impl PostService {
    pub fn new(store: Arc<dyn PostStore>) -> Self {
        Self { store }
    }

    /// A service over the filesystem store rooted at the configured posts directory.
    pub fn with_config(cfg: &CoreConfig) -> Self {
        Self::new(Arc::new(FsPostStore::new(cfg.posts_dir())))
    }

    /// Lists posts newest first, keeping only those matching `params`.
    ///
    /// Posts that fail to parse are still listed with default header fields.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the collection cannot be listed.
    pub fn list(&self, params: &RawQueryParams) -> PostResult<Vec<Post>> {
        let raw = self.store.list_raw()?;
        let mut posts: Vec<Post> = raw
            .into_iter()
            .map(|r| codec::parse(r.id, &r.content))
            .collect();

        order_by_date_desc(&mut posts);

        let condition = build_condition(params);
        let posts = filter_posts(posts, &condition);
        tracing::debug!(count = posts.len(), "listed posts");
        Ok(posts)
    }

    /// Creates a new post and returns its id.
    ///
    /// # Errors
    ///
    /// Returns `PostError::InvalidInput` if title or content is blank, and
    /// `PostError::Conflict` if the generated id is already taken.
    pub fn create(&self, fields: PostFields) -> PostResult<String> {
        self.create_at(fields, Utc::now())
    }

    /// Same as [`PostService::create`], with the id timestamp supplied by the caller.
    pub fn create_at(&self, fields: PostFields, now: DateTime<Utc>) -> PostResult<String> {
        let title = validate_for_write(&fields)?;

        let id = post_id_for(title.as_str(), now);
        let raw = codec::serialize(&fields)?;
        self.store.create_raw(&id, &raw)?;

        tracing::info!(post_id = %id, "created post");
        Ok(id)
    }

    /// Replaces an existing post.
    ///
    /// # Errors
    ///
    /// Returns `PostError::InvalidInput` for blank title/content (checked first),
    /// `PostError::NotFound` if no post has this id.
    pub fn update(&self, id: &str, fields: PostFields) -> PostResult<()> {
        validate_for_write(&fields)?;
        validate_post_id(id)?;

        if !self.store.contains(id)? {
            return Err(PostError::NotFound(id.to_string()));
        }

        let raw = codec::serialize(&fields)?;
        self.store.write_raw(id, &raw)?;

        tracing::info!(post_id = %id, "updated post");
        Ok(())
    }

    /// Removes a post.
    ///
    /// # Errors
    ///
    /// Returns `PostError::MissingId` for an empty id and `PostError::NotFound` for an unknown one.
    pub fn delete(&self, id: &str) -> PostResult<()> {
        validate_post_id(id)?;
        self.store.delete_raw(id)?;

        tracing::info!(post_id = %id, "deleted post");
        Ok(())
    }
}

/// `<title>-<unix millis>.md`, with characters unusable in a file name replaced by `-`.
fn post_id_for(title: &str, now: DateTime<Utc>) -> String {
    let stem: String = title
        .chars()
        .map(|c| match c {
            '/' | '\\' => '-',
            c if c.is_control() => '-',
            c => c,
        })
        .collect();
    let stem = stem.trim_start_matches('.');

    format!("{stem}-{}.{POST_FILE_EXTENSION}", now.timestamp_millis())
}
