use tracing::{error, info, warn};
use uuid::Uuid;

use crate::{
    error::AppError,
    posts::{
        dto::Page,
        repo_types::{FeedItem, NewPost, Post},
    },
    state::AppState,
};

/// Persists the post under `owner_id` and records it in the owner's list.
pub async fn create_post(
    state: &AppState,
    owner_id: Uuid,
    new_post: NewPost,
) -> Result<Post, AppError> {
    let post = state.posts.insert(owner_id, new_post).await?;

    // Two separate writes: if this one fails the post exists without a
    // back-reference on the user.
    if let Err(e) = state.users.append_post_ref(owner_id, post.id).await {
        error!(error = %e, post_id = %post.id, %owner_id, "post saved but owner list not updated");
        return Err(e.into());
    }

    info!(post_id = %post.id, %owner_id, "post created");
    Ok(post)
}

/// Only the owner may delete. The post row goes first, then the owner's
/// list entry; the two writes are not atomic.
pub async fn delete_post(
    state: &AppState,
    requester_id: Uuid,
    post_id: Uuid,
) -> Result<(), AppError> {
    let Some(post) = state.posts.find_by_id(post_id).await? else {
        return Err(AppError::not_found("Post not found"));
    };

    if post.user_id != requester_id {
        warn!(%post_id, owner_id = %post.user_id, %requester_id, "delete by non-owner refused");
        return Err(AppError::Forbidden);
    }

    if !state.posts.delete(post_id).await? {
        // lost a race with another delete of the same post
        return Err(AppError::not_found("Post not found"));
    }

    if let Err(e) = state.users.remove_post_ref(post.user_id, post_id).await {
        error!(error = %e, %post_id, owner_id = %post.user_id, "post deleted but owner list still references it");
        return Err(e.into());
    }

    info!(%post_id, owner_id = %post.user_id, "post deleted");
    Ok(())
}

pub async fn feed(state: &AppState, page: Page) -> Result<Vec<FeedItem>, AppError> {
    Ok(state.posts.feed(page.offset(), page.limit).await?)
}

pub async fn posts_by_user(state: &AppState, user_id: Uuid) -> Result<Vec<Post>, AppError> {
    Ok(state.posts.list_by_user(user_id).await?)
}
