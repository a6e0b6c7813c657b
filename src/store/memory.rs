//! In-process `UserStore` + `PostStore` used by unit and router tests.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::auth::repo::UserStore;
use crate::auth::repo_types::{LeaderboardEntry, NewUser, User, DEFAULT_PROFILE_PIC};
use crate::posts::repo::PostStore;
use crate::posts::repo_types::{FeedItem, NewPost, Post};
use crate::store::StoreError;

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    posts: Vec<Post>,
}

/// Both tables behind one lock; vectors keep insertion order, which stands in
/// for creation order.
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().expect("memory store lock poisoned")
    }

    pub fn post_ids_of(&self, user_id: Uuid) -> Vec<Uuid> {
        self.tables()
            .users
            .iter()
            .find(|u| u.id == user_id)
            .map(|u| u.post_ids.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(self.tables().users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        Ok(self.tables().users.iter().find(|u| u.id == id).cloned())
    }

    async fn create(&self, new_user: NewUser) -> Result<User, StoreError> {
        let mut t = self.tables();
        if t.users.iter().any(|u| u.email == new_user.email) {
            return Err(StoreError::DuplicateKey);
        }
        let user = User {
            id: Uuid::new_v4(),
            username: new_user.username,
            email: new_user.email,
            password_hash: new_user.password_hash,
            post_ids: Vec::new(),
            profile_pic: DEFAULT_PROFILE_PIC.to_string(),
            created_at: OffsetDateTime::now_utc(),
        };
        t.users.push(user.clone());
        Ok(user)
    }

    async fn append_post_ref(&self, user_id: Uuid, post_id: Uuid) -> Result<(), StoreError> {
        let mut t = self.tables();
        if let Some(user) = t.users.iter_mut().find(|u| u.id == user_id) {
            if !user.post_ids.contains(&post_id) {
                user.post_ids.push(post_id);
            }
        }
        Ok(())
    }

    async fn remove_post_ref(&self, user_id: Uuid, post_id: Uuid) -> Result<(), StoreError> {
        let mut t = self.tables();
        if let Some(user) = t.users.iter_mut().find(|u| u.id == user_id) {
            user.post_ids.retain(|id| *id != post_id);
        }
        Ok(())
    }

    async fn leaderboard(&self) -> Result<Vec<LeaderboardEntry>, StoreError> {
        let mut rows: Vec<LeaderboardEntry> = self
            .tables()
            .users
            .iter()
            .map(|u| LeaderboardEntry {
                username: u.username.clone(),
                email: u.email.clone(),
                total_posts: u.post_ids.len() as i64,
            })
            .collect();
        // stable sort keeps registration order among ties
        rows.sort_by(|a, b| b.total_posts.cmp(&a.total_posts));
        Ok(rows)
    }
}

#[async_trait]
impl PostStore for MemoryStore {
    async fn insert(&self, owner_id: Uuid, new_post: NewPost) -> Result<Post, StoreError> {
        let post = Post {
            id: Uuid::new_v4(),
            user_id: owner_id,
            content_link: new_post.content_link,
            title: new_post.title,
            description: new_post.description,
            difficulty_level: new_post.difficulty_level,
            created_at: OffsetDateTime::now_utc(),
        };
        self.tables().posts.push(post.clone());
        Ok(post)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, StoreError> {
        Ok(self.tables().posts.iter().find(|p| p.id == id).cloned())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut t = self.tables();
        let before = t.posts.len();
        t.posts.retain(|p| p.id != id);
        Ok(t.posts.len() < before)
    }

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Post>, StoreError> {
        Ok(self
            .tables()
            .posts
            .iter()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn feed(&self, offset: i64, limit: i64) -> Result<Vec<FeedItem>, StoreError> {
        let t = self.tables();
        let items = t
            .posts
            .iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .map(|p| {
                let author = t.users.iter().find(|u| u.id == p.user_id);
                FeedItem {
                    id: p.id,
                    content_link: p.content_link.clone(),
                    title: p.title.clone(),
                    description: p.description.clone(),
                    created_at: p.created_at,
                    username: author.map(|u| u.username.clone()),
                    profile_picture_link: author.map(|u| u.profile_pic.clone()),
                }
            })
            .collect();
        Ok(items)
    }
}
