//! InMemory User Repository 実装
//!
//! ## 技術的負債
//!
//! ドメインモデル（`User`）を直接ストレージとして使用しています。
//! 将来ドキュメント DB を実装する際は DTO への変換層が必要になります。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{Email, RepositoryError, User, UserId, UserRepository, Username};

/// インメモリ User Repository 実装
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<HashMap<UserId, User>>,
}

impl InMemoryUserRepository {
    /// 新しい InMemoryUserRepository を作成
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: User) -> Result<(), RepositoryError> {
        let mut users = self.users.lock().await;
        let duplicate = users
            .values()
            .any(|existing| existing.email == user.email || existing.username == user.username);
        if duplicate {
            return Err(RepositoryError::DuplicateUser);
        }
        users.insert(user.id.clone(), user);
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Option<User> {
        let users = self.users.lock().await;
        users.get(id).cloned()
    }

    async fn find_by_email(&self, email: &Email) -> Option<User> {
        let users = self.users.lock().await;
        users.values().find(|user| &user.email == email).cloned()
    }

    async fn find_by_username(&self, username: &Username) -> Option<User> {
        let users = self.users.lock().await;
        users
            .values()
            .find(|user| &user.username == username)
            .cloned()
    }

    async fn update(&self, user: User) -> Result<(), RepositoryError> {
        let mut users = self.users.lock().await;
        if !users.contains_key(&user.id) {
            return Err(RepositoryError::UserNotFound);
        }
        users.insert(user.id.clone(), user);
        Ok(())
    }
}
