//! UseCase: プロフィール更新処理

use std::sync::Arc;

use crate::domain::{DisplayName, User, UserId, UserRepository};

use super::error::ProfileError;

/// プロフィール更新のユースケース
pub struct UpdateUserProfileUseCase {
    /// User Repository（アカウント永続化の抽象化）
    users: Arc<dyn UserRepository>,
}

impl UpdateUserProfileUseCase {
    /// 新しい UpdateUserProfileUseCase を作成
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// プロフィールを部分更新
    ///
    /// `None` のフィールドは変更しない。
    pub async fn execute(
        &self,
        user_id: &UserId,
        display_name: Option<String>,
    ) -> Result<User, ProfileError> {
        let mut user = self
            .users
            .find_by_id(user_id)
            .await
            .ok_or(ProfileError::UserNotFound)?;

        if let Some(name) = display_name {
            user.display_name = DisplayName::new(name)?;
        }

        self.users
            .update(user.clone())
            .await
            .map_err(|_| ProfileError::UserNotFound)?;

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Email, Timestamp, Username};
    use crate::infrastructure::repository::InMemoryUserRepository;

    async fn create_usecase_with_user() -> (UpdateUserProfileUseCase, User) {
        let users = Arc::new(InMemoryUserRepository::new());
        let user = User::new(
            Username::new("alice".to_string()).unwrap(),
            Email::new("alice@example.com".to_string()).unwrap(),
            "hash".to_string(),
            DisplayName::new("alice".to_string()).unwrap(),
            Timestamp::new(1000),
        );
        users.insert(user.clone()).await.unwrap();
        (UpdateUserProfileUseCase::new(users), user)
    }

    #[tokio::test]
    async fn test_update_display_name() {
        // テスト項目: 表示名が更新される
        // given (前提条件):
        let (usecase, user) = create_usecase_with_user().await;

        // when (操作):
        let updated = usecase
            .execute(&user.id, Some("Alice the Great".to_string()))
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(updated.display_name.as_str(), "Alice the Great");
    }

    #[tokio::test]
    async fn test_update_with_no_fields_is_noop() {
        // テスト項目: フィールド未指定の更新が no-op になる
        // given (前提条件):
        let (usecase, user) = create_usecase_with_user().await;

        // when (操作):
        let updated = usecase.execute(&user.id, None).await.unwrap();

        // then (期待する結果):
        assert_eq!(updated, user);
    }

    #[tokio::test]
    async fn test_update_rejects_invalid_display_name() {
        // テスト項目: 空の表示名が拒否される
        // given (前提条件):
        let (usecase, user) = create_usecase_with_user().await;

        // when (操作):
        let result = usecase.execute(&user.id, Some("  ".to_string())).await;

        // then (期待する結果):
        assert!(matches!(result, Err(ProfileError::Validation(_))));
    }

    #[tokio::test]
    async fn test_update_unknown_user() {
        // テスト項目: 未知のユーザーの更新がエラーになる
        // given (前提条件):
        let (usecase, _user) = create_usecase_with_user().await;

        // when (操作):
        let result = usecase
            .execute(&UserId::generate(), Some("Ghost".to_string()))
            .await;

        // then (期待する結果):
        assert_eq!(result.unwrap_err(), ProfileError::UserNotFound);
    }
}
