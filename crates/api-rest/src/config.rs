//! REST server configuration.

/// Default bind address for the REST server.
pub const DEFAULT_REST_ADDR: &str = "0.0.0.0:3000";

/// REST settings resolved at startup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RestConfig {
    pub addr: String,
    /// When set, CORS is restricted to this origin (with credentials).
    pub cors_origin: Option<String>,
}

impl RestConfig {
    /// Builds the config from raw environment values (`POSTS_REST_ADDR`, `POSTS_CORS_ORIGIN`).
    pub fn from_env_values(addr: Option<String>, cors_origin: Option<String>) -> Self {
        Self {
            addr: addr
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| DEFAULT_REST_ADDR.into()),
            cors_origin: cors_origin_from_env_value(cors_origin),
        }
    }

    pub fn from_env() -> Self {
        Self::from_env_values(
            std::env::var("POSTS_REST_ADDR").ok(),
            std::env::var("POSTS_CORS_ORIGIN").ok(),
        )
    }
}

/// Normalises an optional CORS origin.
///
/// Blank values mean "not configured". A trailing `/` is dropped since browsers never send one
/// in the `Origin` header.
pub fn cors_origin_from_env_value(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().trim_end_matches('/').to_string())
        .filter(|v| !v.is_empty())
}
