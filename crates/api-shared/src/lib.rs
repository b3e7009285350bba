//! # API Shared
//!
//! Shared wire types and services for the blog post APIs.
//!
//! Contains:
//! - JSON request/response bodies (`dto` module), with OpenAPI schemas
//! - Shared services like `HealthService`
//!
//! Used by `api-rest` and the `posts` CLI's JSON output.

pub mod dto;
pub mod health;

pub use dto::{CreatePostRes, ErrorRes, MessageRes, PostRes, SavePostReq};
pub use health::{HealthRes, HealthService};
