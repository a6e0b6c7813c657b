use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::repo_types::{LeaderboardEntry, NewUser, User, DEFAULT_PROFILE_PIC};
use crate::store::StoreError;

/// Persistence of user records and their denormalized post list.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError>;
    /// Fails with `StoreError::DuplicateKey` when the email is taken.
    async fn create(&self, new_user: NewUser) -> Result<User, StoreError>;
    /// Adds `post_id` to the owner's list unless it is already there.
    async fn append_post_ref(&self, user_id: Uuid, post_id: Uuid) -> Result<(), StoreError>;
    async fn remove_post_ref(&self, user_id: Uuid, post_id: Uuid) -> Result<(), StoreError>;
    /// All users ranked by number of owned posts, most first.
    async fn leaderboard(&self) -> Result<Vec<LeaderboardEntry>, StoreError>;
}

#[derive(Clone)]
pub struct PgUserStore {
    db: PgPool,
}

impl PgUserStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password_hash, post_ids, profile_pic, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await?;
        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password_hash, post_ids, profile_pic, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;
        Ok(user)
    }

    async fn create(&self, new_user: NewUser) -> Result<User, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, username, email, password_hash, profile_pic)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, username, email, password_hash, post_ids, profile_pic, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&new_user.username)
        .bind(&new_user.email)
        .bind(&new_user.password_hash)
        .bind(DEFAULT_PROFILE_PIC)
        .fetch_one(&self.db)
        .await?;
        Ok(user)
    }

    async fn append_post_ref(&self, user_id: Uuid, post_id: Uuid) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            UPDATE users
               SET post_ids = array_append(post_ids, $2)
             WHERE id = $1
               AND NOT ($2 = ANY(post_ids))
            "#,
        )
        .bind(user_id)
        .bind(post_id)
        .execute(&self.db)
        .await?;
        Ok(())
    }

    async fn remove_post_ref(&self, user_id: Uuid, post_id: Uuid) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            UPDATE users
               SET post_ids = array_remove(post_ids, $2)
             WHERE id = $1
            "#,
        )
        .bind(user_id)
        .bind(post_id)
        .execute(&self.db)
        .await?;
        Ok(())
    }

    async fn leaderboard(&self) -> Result<Vec<LeaderboardEntry>, StoreError> {
        let rows = sqlx::query_as::<_, LeaderboardEntry>(
            r#"
            SELECT username, email, cardinality(post_ids)::BIGINT AS total_posts
              FROM users
             ORDER BY total_posts DESC, created_at ASC
            "#,
        )
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }
}
