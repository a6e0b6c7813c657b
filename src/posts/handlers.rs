use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use tracing::instrument;

use crate::{
    auth::extractors::AuthUser,
    error::AppError,
    posts::{
        dto::{CreatePostRequest, CreatedPostResponse, FeedQuery, MessageResponse},
        repo_types::FeedItem,
        services,
    },
    state::AppState,
    validation::{parse_id, ValidatedJson},
};

pub fn read_routes() -> Router<AppState> {
    Router::new().route("/feed", get(feed))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/postVideo", post(create_post))
        .route("/deletevideo/:id", delete(delete_post))
}

#[instrument(skip_all, fields(user_id = %claims.sub))]
pub async fn create_post(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    ValidatedJson(new_post): ValidatedJson<CreatePostRequest>,
) -> Result<(StatusCode, Json<CreatedPostResponse>), AppError> {
    let post = services::create_post(&state, claims.sub, new_post).await?;
    Ok((
        StatusCode::CREATED,
        Json(CreatedPostResponse {
            data: post,
            message: "Video uploaded successfully",
        }),
    ))
}

#[instrument(skip_all, fields(user_id = %claims.sub, post_id = %id))]
pub async fn delete_post(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let post_id = parse_id(&id, "Invalid post id")?;
    services::delete_post(&state, claims.sub, post_id).await?;
    Ok(Json(MessageResponse {
        message: "Post deleted successfully",
    }))
}

#[instrument(skip(state))]
pub async fn feed(
    State(state): State<AppState>,
    Query(query): Query<FeedQuery>,
) -> Result<Json<Vec<FeedItem>>, AppError> {
    let items = services::feed(&state, query.into()).await?;
    Ok(Json(items))
}
