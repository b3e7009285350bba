use super::{PostStore, RawPost};
use crate::error::{PostError, PostResult};
use crate::validation::validate_post_id;
use std::collections::BTreeMap;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{PoisonError, RwLock};

/// In-memory post storage for testing.
///
/// A `BTreeMap` keeps ids sorted, which matches the listing order of [`super::FsPostStore`].
#[derive(Debug, Default)]
pub struct MemPostStore {
    posts: RwLock<BTreeMap<String, String>>,
    simulate_write_error: AtomicBool,
}

impl MemPostStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store pre-populated with `(id, content)` pairs.
    pub fn with_posts<I, K, V>(posts: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let store = Self::new();
        {
            let mut map = store.posts.write().unwrap_or_else(PoisonError::into_inner);
            for (id, content) in posts {
                map.insert(id.into(), content.into());
            }
        }
        store
    }

    /// Make every subsequent create/write/delete fail with an I/O error.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.store(simulate, Ordering::SeqCst);
    }

    fn check_write(&self) -> io::Result<()> {
        if self.simulate_write_error.load(Ordering::SeqCst) {
            return Err(io::Error::other("simulated write error"));
        }
        Ok(())
    }
}

impl PostStore for MemPostStore {
    fn list_raw(&self) -> PostResult<Vec<RawPost>> {
        let posts = self.posts.read().unwrap_or_else(PoisonError::into_inner);
        Ok(posts
            .iter()
            .map(|(id, content)| RawPost {
                id: id.clone(),
                content: content.clone(),
            })
            .collect())
    }

    fn read_raw(&self, id: &str) -> PostResult<Option<String>> {
        validate_post_id(id)?;
        let posts = self.posts.read().unwrap_or_else(PoisonError::into_inner);
        Ok(posts.get(id).cloned())
    }

    fn create_raw(&self, id: &str, content: &str) -> PostResult<()> {
        validate_post_id(id)?;
        self.check_write().map_err(PostError::FileWrite)?;
        let mut posts = self.posts.write().unwrap_or_else(PoisonError::into_inner);
        if posts.contains_key(id) {
            return Err(PostError::Conflict(id.to_string()));
        }
        posts.insert(id.to_string(), content.to_string());
        Ok(())
    }

    fn write_raw(&self, id: &str, content: &str) -> PostResult<()> {
        validate_post_id(id)?;
        self.check_write().map_err(PostError::FileWrite)?;
        let mut posts = self.posts.write().unwrap_or_else(PoisonError::into_inner);
        match posts.get_mut(id) {
            Some(existing) => {
                *existing = content.to_string();
                Ok(())
            }
            None => Err(PostError::NotFound(id.to_string())),
        }
    }

    fn delete_raw(&self, id: &str) -> PostResult<()> {
        validate_post_id(id)?;
        self.check_write().map_err(PostError::FileDelete)?;
        let mut posts = self.posts.write().unwrap_or_else(PoisonError::into_inner);
        match posts.remove(id) {
            Some(_) => Ok(()),
            None => Err(PostError::NotFound(id.to_string())),
        }
    }
}
