//! UseCase: ログイン処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - LoginUserUseCase::execute() メソッド
//! - パスワード照合とトークン発行
//!
//! ### なぜこのテストが必要か
//! - 「アカウントが存在しない」と「パスワードが違う」が外部から
//!   区別できないこと（InvalidCredentials）を保証
//!
//! ### どのような状況を想定しているか
//! - 正常系: 正しい資格情報でのログイン
//! - 異常系: 未知のメール、誤ったパスワード

use std::sync::Arc;

use crate::domain::{Email, TokenService, User, UserRepository};

use super::error::LoginError;

/// ログインのユースケース
pub struct LoginUserUseCase {
    /// User Repository（アカウント永続化の抽象化）
    users: Arc<dyn UserRepository>,
    /// TokenService（トークン発行の抽象化）
    tokens: Arc<dyn TokenService>,
}

impl LoginUserUseCase {
    /// 新しい LoginUserUseCase を作成
    pub fn new(users: Arc<dyn UserRepository>, tokens: Arc<dyn TokenService>) -> Self {
        Self { users, tokens }
    }

    /// ログインを実行
    ///
    /// # Returns
    ///
    /// * `Ok((User, String))` - アカウントと Bearer トークン
    /// * `Err(LoginError)` - ログイン失敗
    pub async fn execute(&self, email: &str, password: &str) -> Result<(User, String), LoginError> {
        // メール形式が不正な場合も InvalidCredentials に落とす
        // （存在の有無を漏らさない）
        let email =
            Email::new(email.to_string()).map_err(|_| LoginError::InvalidCredentials)?;

        let user = self
            .users
            .find_by_email(&email)
            .await
            .ok_or(LoginError::InvalidCredentials)?;

        if !bcrypt::verify(password, &user.password_hash).unwrap_or(false) {
            return Err(LoginError::InvalidCredentials);
        }

        let token = self.tokens.issue(&user.id)?;

        tracing::info!("User '{}' logged in", user.username.as_str());
        Ok((user, token))
    }
}
