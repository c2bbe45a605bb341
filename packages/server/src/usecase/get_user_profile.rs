//! UseCase: プロフィール取得処理

use std::sync::Arc;

use crate::domain::{User, UserId, UserRepository};

use super::error::ProfileError;

/// プロフィール取得のユースケース
pub struct GetUserProfileUseCase {
    /// User Repository（アカウント永続化の抽象化）
    users: Arc<dyn UserRepository>,
}

impl GetUserProfileUseCase {
    /// 新しい GetUserProfileUseCase を作成
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// プロフィールを取得
    pub async fn execute(&self, user_id: &UserId) -> Result<User, ProfileError> {
        self.users
            .find_by_id(user_id)
            .await
            .ok_or(ProfileError::UserNotFound)
    }
}
