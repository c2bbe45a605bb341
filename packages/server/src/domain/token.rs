//! TokenService trait 定義
//!
//! Bearer トークンの発行と検証のインターフェース。具体的な JWT 実装は
//! Infrastructure 層が提供します。

use thiserror::Error;

use super::value_object::UserId;

/// トークンのエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// 期限切れ・改ざん・形式不正
    #[error("token is expired or malformed")]
    Invalid,

    /// 発行に失敗した
    #[error("failed to issue token: {0}")]
    Issue(String),
}

/// TokenService trait
pub trait TokenService: Send + Sync {
    /// ユーザー ID を主体とするトークンを発行する
    fn issue(&self, user_id: &UserId) -> Result<String, TokenError>;

    /// トークンを検証し、主体のユーザー ID を返す
    fn verify(&self, token: &str) -> Result<UserId, TokenError>;
}
