use uuid::Uuid;

use crate::{
    auth::repo_types::{LeaderboardEntry, User},
    error::AppError,
    state::AppState,
};

pub async fn get_user(state: &AppState, user_id: Uuid) -> Result<User, AppError> {
    state
        .users
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))
}

/// Ranked by size of each user's post list; the list itself and the
/// password hash are not part of an entry.
pub async fn leaderboard(state: &AppState) -> Result<Vec<LeaderboardEntry>, AppError> {
    Ok(state.users.leaderboard().await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::repo_types::NewUser;

    async fn user(state: &AppState, name: &str, posts: usize) -> Uuid {
        let id = state
            .users
            .create(NewUser {
                username: name.into(),
                email: format!("{name}@x.com"),
                password_hash: "$argon2id$placeholder".into(),
            })
            .await
            .unwrap()
            .id;
        for _ in 0..posts {
            state.users.append_post_ref(id, Uuid::new_v4()).await.unwrap();
        }
        id
    }

    #[tokio::test]
    async fn leaderboard_sorts_by_post_count() {
        let state = AppState::fake();
        user(&state, "few", 1).await;
        user(&state, "many", 3).await;
        user(&state, "none", 0).await;

        let board = leaderboard(&state).await.unwrap();
        let ranked: Vec<(&str, i64)> = board
            .iter()
            .map(|e| (e.username.as_str(), e.total_posts))
            .collect();
        assert_eq!(ranked, vec![("many", 3), ("few", 1), ("none", 0)]);

        let json = serde_json::to_value(&board[0]).unwrap();
        assert_eq!(json["totalPosts"], 3);
        assert!(json.get("passwordHash").is_none());
        assert!(json.get("posts").is_none());
    }

    #[tokio::test]
    async fn append_is_idempotent() {
        let state = AppState::fake();
        let id = user(&state, "solo", 0).await;
        let post_id = Uuid::new_v4();
        state.users.append_post_ref(id, post_id).await.unwrap();
        state.users.append_post_ref(id, post_id).await.unwrap();
        assert_eq!(get_user(&state, id).await.unwrap().post_ids, vec![post_id]);
    }

    #[tokio::test]
    async fn unknown_user_is_not_found() {
        let state = AppState::fake();
        let err = get_user(&state, Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
