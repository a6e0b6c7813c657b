use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use tracing::instrument;

use crate::{
    auth::repo_types::{LeaderboardEntry, User},
    error::AppError,
    posts::{repo_types::Post, services::posts_by_user},
    state::AppState,
    users::services,
    validation::parse_id,
};

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/user/:id", get(get_user))
        .route("/userPosted/:id", get(user_posts))
        .route("/lead", get(leaderboard))
}

/// Public profile. The password hash is never serialized.
#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<User>, AppError> {
    let user_id = parse_id(&id, "Invalid user id")?;
    Ok(Json(services::get_user(&state, user_id).await?))
}

#[instrument(skip(state))]
pub async fn user_posts(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Post>>, AppError> {
    let user_id = parse_id(&id, "Invalid user id")?;
    Ok(Json(posts_by_user(&state, user_id).await?))
}

#[instrument(skip(state))]
pub async fn leaderboard(
    State(state): State<AppState>,
) -> Result<Json<Vec<LeaderboardEntry>>, AppError> {
    Ok(Json(services::leaderboard(&state).await?))
}
