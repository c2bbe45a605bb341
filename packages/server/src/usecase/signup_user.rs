//! UseCase: アカウント登録処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SignupUserUseCase::execute() メソッド
//! - 入力検証、重複アカウントの拒否、パスワードハッシュ化、トークン発行
//!
//! ### なぜこのテストが必要か
//! - 平文パスワードが保存されないことを保証
//! - ユーザー名・メールの一意性を保証
//!
//! ### どのような状況を想定しているか
//! - 正常系: 新規アカウントの登録（表示名の既定値を含む）
//! - 異常系: 重複アカウント、検証エラー

use std::sync::Arc;

use crate::domain::{
    DisplayName, Email, Password, TokenService, Timestamp, User, UserRepository, Username,
};
use juku_shared::time::now_epoch_millis;

use super::error::SignupError;

/// アカウント登録の入力
#[derive(Debug, Clone)]
pub struct SignupInput {
    pub username: String,
    pub email: String,
    pub password: String,
    /// 省略時はユーザー名が表示名になる
    pub display_name: Option<String>,
}

/// アカウント登録のユースケース
pub struct SignupUserUseCase {
    /// User Repository（アカウント永続化の抽象化）
    users: Arc<dyn UserRepository>,
    /// TokenService（トークン発行の抽象化）
    tokens: Arc<dyn TokenService>,
}

impl SignupUserUseCase {
    /// 新しい SignupUserUseCase を作成
    pub fn new(users: Arc<dyn UserRepository>, tokens: Arc<dyn TokenService>) -> Self {
        Self { users, tokens }
    }

    /// アカウント登録を実行
    ///
    /// # Returns
    ///
    /// * `Ok((User, String))` - 作成されたアカウントと Bearer トークン
    /// * `Err(SignupError)` - 登録失敗
    pub async fn execute(&self, input: SignupInput) -> Result<(User, String), SignupError> {
        // 1. 入力検証
        let username = Username::new(input.username)?;
        let email = Email::new(input.email)?;
        let password = Password::new(input.password)?;
        let display_name = match input.display_name {
            Some(name) => DisplayName::new(name)?,
            None => DisplayName::new(username.as_str().to_string())?,
        };

        // 2. 重複チェック
        if self.users.find_by_email(&email).await.is_some()
            || self.users.find_by_username(&username).await.is_some()
        {
            return Err(SignupError::DuplicateAccount);
        }

        // 3. パスワードをハッシュ化して保存
        let password_hash = bcrypt::hash(password.as_str(), bcrypt::DEFAULT_COST)
            .map_err(|e| SignupError::Hash(e.to_string()))?;
        let user = User::new(
            username,
            email,
            password_hash,
            display_name,
            Timestamp::new(now_epoch_millis()),
        );
        self.users
            .insert(user.clone())
            .await
            .map_err(|_| SignupError::DuplicateAccount)?;

        // 4. トークンを発行
        let token = self.tokens.issue(&user.id)?;

        tracing::info!("User '{}' signed up", user.username.as_str());
        Ok((user, token))
    }
}
