use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::posts::repo_types::{FeedItem, NewPost, Post};
use crate::store::StoreError;

#[async_trait]
pub trait PostStore: Send + Sync {
    async fn insert(&self, owner_id: Uuid, new_post: NewPost) -> Result<Post, StoreError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, StoreError>;
    /// Returns `false` when no row was removed (already gone).
    async fn delete(&self, id: Uuid) -> Result<bool, StoreError>;
    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Post>, StoreError>;
    /// Posts in creation order with author fields, sliced by offset/limit.
    async fn feed(&self, offset: i64, limit: i64) -> Result<Vec<FeedItem>, StoreError>;
}

#[derive(Clone)]
pub struct PgPostStore {
    db: PgPool,
}

impl PgPostStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PostStore for PgPostStore {
    async fn insert(&self, owner_id: Uuid, new_post: NewPost) -> Result<Post, StoreError> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            INSERT INTO posts (id, user_id, content_link, title, description, difficulty_level)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, user_id, content_link, title, description, difficulty_level, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(owner_id)
        .bind(&new_post.content_link)
        .bind(&new_post.title)
        .bind(&new_post.description)
        .bind(new_post.difficulty_level)
        .fetch_one(&self.db)
        .await?;
        Ok(post)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, StoreError> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            SELECT id, user_id, content_link, title, description, difficulty_level, created_at
              FROM posts
             WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;
        Ok(post)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Post>, StoreError> {
        let rows = sqlx::query_as::<_, Post>(
            r#"
            SELECT id, user_id, content_link, title, description, difficulty_level, created_at
              FROM posts
             WHERE user_id = $1
             ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }

    async fn feed(&self, offset: i64, limit: i64) -> Result<Vec<FeedItem>, StoreError> {
        let rows = sqlx::query_as::<_, FeedItem>(
            r#"
            SELECT p.id, p.content_link, p.title, p.description, p.created_at,
                   u.username, u.profile_pic AS profile_picture_link
              FROM posts p
              LEFT JOIN users u ON u.id = p.user_id
             ORDER BY p.created_at ASC, p.id ASC
             LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{
        repo::{PgUserStore, UserStore},
        repo_types::{NewUser, DEFAULT_PROFILE_PIC},
    };

    fn new_post(title: &str) -> NewPost {
        NewPost {
            title: title.into(),
            description: "d".into(),
            content_link: "https://cdn.example/v.mp4".into(),
            difficulty_level: 2,
        }
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore] // Requires DATABASE_URL
    async fn pg_feed_joins_author_and_pages_in_creation_order(db: PgPool) {
        let users = PgUserStore::new(db.clone());
        let posts = PgPostStore::new(db);
        let ana = users
            .create(NewUser {
                username: "ana".into(),
                email: "a@x.com".into(),
                password_hash: "$argon2id$stub".into(),
            })
            .await
            .unwrap();
        for i in 1..=5 {
            posts
                .insert(ana.id, new_post(&format!("Pose {i}")))
                .await
                .unwrap();
        }

        let page: Vec<String> = posts
            .feed(2, 2)
            .await
            .unwrap()
            .into_iter()
            .map(|item| item.title)
            .collect();
        assert_eq!(page, vec!["Pose 3", "Pose 4"]);

        let first = &posts.feed(0, 1).await.unwrap()[0];
        assert_eq!(first.username.as_deref(), Some("ana"));
        assert_eq!(first.profile_picture_link.as_deref(), Some(DEFAULT_PROFILE_PIC));
        assert!(posts.feed(10, 10).await.unwrap().is_empty());
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore] // Requires DATABASE_URL
    async fn pg_delete_reports_missing_rows(db: PgPool) {
        let users = PgUserStore::new(db.clone());
        let posts = PgPostStore::new(db);
        let ana = users
            .create(NewUser {
                username: "ana".into(),
                email: "a@x.com".into(),
                password_hash: "$argon2id$stub".into(),
            })
            .await
            .unwrap();
        let post = posts.insert(ana.id, new_post("Short flow")).await.unwrap();
        assert_eq!(posts.list_by_user(ana.id).await.unwrap().len(), 1);

        assert!(posts.delete(post.id).await.unwrap());
        assert!(!posts.delete(post.id).await.unwrap());
        assert!(posts.find_by_id(post.id).await.unwrap().is_none());
        assert!(posts.list_by_user(ana.id).await.unwrap().is_empty());
    }
}
