//! # API REST
//!
//! REST API for the blog post store.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON bodies, status codes, CORS)
//!
//! Uses `api-shared` for wire types and `posts-core` for everything else.

#![warn(rust_2018_idioms)]

pub mod config;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::{header, HeaderValue, Method, StatusCode},
    response::Json,
    routing::{get, put},
    Router,
};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use api_shared::{CreatePostRes, ErrorRes, HealthRes, HealthService, MessageRes, PostRes, SavePostReq};
use posts_core::{ErrorKind, PostError, PostFields, PostService, RawQueryParams};

pub use config::{cors_origin_from_env_value, RestConfig, DEFAULT_REST_ADDR};

/// Application state shared across REST handlers.
#[derive(Clone)]
pub struct AppState {
    posts: PostService,
}

impl AppState {
    pub fn new(posts: PostService) -> Self {
        Self { posts }
    }
}

type ApiError = (StatusCode, Json<ErrorRes>);

#[derive(OpenApi)]
#[openapi(
    paths(health, list_posts, create_post, update_post, delete_post, delete_post_without_id),
    components(schemas(HealthRes, PostRes, SavePostReq, MessageRes, CreatePostRes, ErrorRes))
)]
pub struct ApiDoc;

/// Builds the router for the post endpoints, Swagger UI and health check.
pub fn router(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(
            "/api/posts",
            get(list_posts).post(create_post).delete(delete_post_without_id),
        )
        .route("/api/posts/:id", put(update_post).delete(delete_post))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .with_state(state)
}

/// CORS policy for the REST API.
///
/// Without an origin every origin is allowed. With one, only that origin may call the API, with
/// credentials.
///
/// # Errors
///
/// Returns an error if `origin` is not a valid header value.
pub fn cors_layer(origin: Option<&str>) -> anyhow::Result<CorsLayer> {
    let Some(origin) = origin else {
        return Ok(CorsLayer::permissive());
    };

    let origin: HeaderValue = origin.parse()?;
    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]))
}

/// Binds `cfg.addr` and serves the REST API until the server stops.
///
/// # Errors
///
/// Returns an error if the CORS origin is invalid, the address cannot be bound, or the server
/// fails while running.
pub async fn serve(posts: PostService, cfg: &RestConfig) -> anyhow::Result<()> {
    let app = router(AppState::new(posts), cors_layer(cfg.cors_origin.as_deref())?);

    let listener = tokio::net::TcpListener::bind(&cfg.addr).await?;
    tracing::info!("-- Serving posts REST API on {}", cfg.addr);
    axum::serve(listener, app).await?;
    Ok(())
}

/// Maps a core error onto a status code and `{error}` body.
///
/// Storage failures are logged and answered with `failure` only, so file system details never
/// reach the client.
fn api_error(e: PostError, failure: &'static str) -> ApiError {
    let (status, message) = match e.kind() {
        ErrorKind::Validation => (
            StatusCode::BAD_REQUEST,
            match e {
                PostError::InvalidInput(message) => message,
                other => other.to_string(),
            },
        ),
        ErrorKind::NotFound => (StatusCode::NOT_FOUND, "post not found".to_string()),
        ErrorKind::Conflict => (StatusCode::CONFLICT, "post already exists".to_string()),
        ErrorKind::Storage => {
            tracing::error!("{}: {}", failure, e);
            (StatusCode::INTERNAL_SERVER_ERROR, failure.to_string())
        }
    };
    (status, Json(ErrorRes::new(message)))
}

fn body_error(rejection: JsonRejection) -> ApiError {
    tracing::info!("rejected request body: {}", rejection.body_text());
    (rejection.status(), Json(ErrorRes::new(rejection.body_text())))
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
#[axum::debug_handler]
async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    get,
    path = "/api/posts",
    params(
        ("title" = Option<String>, Query, description = "Case-insensitive substring of the title"),
        ("categories" = Option<String>, Query, description = "Comma-separated categories, all required"),
        ("tags" = Option<String>, Query, description = "Comma-separated tags, all required")
    ),
    responses(
        (status = 200, description = "Posts, newest first", body = [PostRes]),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// List posts newest first, optionally filtered.
///
/// Repeated query keys are joined, so `?tags=a&tags=b` is the same as `?tags=a,b`.
#[axum::debug_handler]
async fn list_posts(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<Vec<PostRes>>, ApiError> {
    let params = RawQueryParams::from_pairs(pairs);
    tracing::info!(?params, "list posts");

    let posts = state
        .posts
        .list(&params)
        .map_err(|e| api_error(e, "failed to list posts"))?;
    Ok(Json(posts.into_iter().map(PostRes::from).collect()))
}

#[utoipa::path(
    post,
    path = "/api/posts",
    request_body = SavePostReq,
    responses(
        (status = 201, description = "Post created", body = CreatePostRes),
        (status = 400, description = "Title or content missing", body = ErrorRes),
        (status = 409, description = "A post with the generated id already exists", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
#[axum::debug_handler]
async fn create_post(
    State(state): State<AppState>,
    req: Result<Json<SavePostReq>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatePostRes>), ApiError> {
    let Json(req) = req.map_err(body_error)?;
    tracing::info!(title = ?req.title, "create post");

    let id = state
        .posts
        .create(PostFields::from(req))
        .map_err(|e| api_error(e, "failed to create post"))?;

    Ok((
        StatusCode::CREATED,
        Json(CreatePostRes {
            message: "post created".into(),
            id,
        }),
    ))
}

#[utoipa::path(
    put,
    path = "/api/posts/{id}",
    params(("id" = String, Path, description = "Post id (file name)")),
    request_body = SavePostReq,
    responses(
        (status = 200, description = "Post updated", body = MessageRes),
        (status = 400, description = "Title or content missing", body = ErrorRes),
        (status = 404, description = "No post with this id", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
#[axum::debug_handler]
async fn update_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
    req: Result<Json<SavePostReq>, JsonRejection>,
) -> Result<Json<MessageRes>, ApiError> {
    let Json(req) = req.map_err(body_error)?;
    tracing::info!(post_id = %id, "update post");

    state
        .posts
        .update(&id, PostFields::from(req))
        .map_err(|e| api_error(e, "failed to update post"))?;
    Ok(Json(MessageRes::new("post updated")))
}

#[utoipa::path(
    delete,
    path = "/api/posts/{id}",
    params(("id" = String, Path, description = "Post id (file name)")),
    responses(
        (status = 200, description = "Post deleted", body = MessageRes),
        (status = 404, description = "No post with this id", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
#[axum::debug_handler]
async fn delete_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageRes>, ApiError> {
    tracing::info!(post_id = %id, "delete post");

    state
        .posts
        .delete(&id)
        .map_err(|e| api_error(e, "failed to delete post"))?;
    Ok(Json(MessageRes::new("post deleted")))
}

#[utoipa::path(
    delete,
    path = "/api/posts",
    responses(
        (status = 400, description = "No post id given", body = ErrorRes)
    )
)]
#[axum::debug_handler]
async fn delete_post_without_id(State(_state): State<AppState>) -> ApiError {
    api_error(PostError::MissingId, "failed to delete post")
}
