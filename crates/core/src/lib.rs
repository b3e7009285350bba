//! # Posts Core
//!
//! Core logic for the blog post store.
//!
//! This crate contains pure document operations and the storage seam:
//! - Parsing raw post files into [`Post`] records and serializing them back ([`codec`])
//! - Building filter conditions from query parameters and applying them ([`query`])
//! - Ordering a collection newest first ([`order`])
//! - Validating write input ([`validation`])
//! - The [`PostStore`] collaborator trait with filesystem and in-memory implementations
//! - [`PostService`], which ties the above together for list/create/update/delete
//!
//! **No API concerns**: HTTP routing, CORS and JSON response shapes belong in `api-rest` and
//! `api-shared`.

pub mod codec;
pub mod config;
pub mod constants;
pub mod error;
pub mod model;
pub mod order;
pub mod query;
pub mod service;
pub mod store;
pub mod validation;

pub use config::CoreConfig;
pub use constants::DEFAULT_POSTS_DIR;
pub use error::{ErrorKind, PostError, PostResult};
pub use model::{Post, PostFields};
pub use posts_types::{NonEmptyText, PublishedAt};
pub use query::{QueryCondition, RawQueryParams};
pub use service::PostService;
pub use store::{FsPostStore, MemPostStore, PostStore, RawPost};
