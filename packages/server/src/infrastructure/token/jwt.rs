//! JWT を使った TokenService 実装
//!
//! HS256 で署名した JWT を Bearer トークンとして発行・検証します。
//! `sub` がユーザー ID、有効期限は既定で 7 日。

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::domain::{TokenError, TokenService, UserId};

/// トークンの既定の有効期間（7 日）
pub const DEFAULT_VALIDITY_SECS: i64 = 7 * 24 * 60 * 60;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// 主体（ユーザー ID）
    sub: String,
    /// 発行時刻（Unix 秒）
    iat: i64,
    /// 有効期限（Unix 秒）
    exp: i64,
}

/// JWT を使った TokenService 実装
pub struct JwtTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validity_secs: i64,
}

impl JwtTokenService {
    /// 新しい JwtTokenService を作成
    pub fn new(secret: &str, validity_secs: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validity_secs,
        }
    }

    /// 既定の有効期間（7 日）で作成
    pub fn with_default_validity(secret: &str) -> Self {
        Self::new(secret, DEFAULT_VALIDITY_SECS)
    }
}

impl TokenService for JwtTokenService {
    fn issue(&self, user_id: &UserId) -> Result<String, TokenError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: user_id.as_str().to_string(),
            iat: now,
            exp: now + self.validity_secs,
        };
        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Issue(e.to_string()))
    }

    fn verify(&self, token: &str) -> Result<UserId, TokenError> {
        let data = decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map_err(|_| TokenError::Invalid)?;
        UserId::new(data.claims.sub).map_err(|_| TokenError::Invalid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_and_verify_round_trip() {
        // テスト項目: 発行したトークンが検証でき、主体が一致する
        // given (前提条件):
        let service = JwtTokenService::with_default_validity("test-secret");
        let user_id = UserId::generate();

        // when (操作):
        let token = service.issue(&user_id).unwrap();
        let verified = service.verify(&token).unwrap();

        // then (期待する結果):
        assert_eq!(verified, user_id);
    }

    #[test]
    fn test_verify_rejects_garbage() {
        // テスト項目: 形式不正のトークンが拒否される
        // given (前提条件):
        let service = JwtTokenService::with_default_validity("test-secret");

        // when (操作):
        let result = service.verify("not-a-jwt");

        // then (期待する結果):
        assert_eq!(result, Err(TokenError::Invalid));
    }

    #[test]
    fn test_verify_rejects_expired_token() {
        // テスト項目: 期限切れのトークンが拒否される
        // given (前提条件): 有効期限が過去になるサービス
        let service = JwtTokenService::new("test-secret", -3600);
        let user_id = UserId::generate();

        // when (操作):
        let token = service.issue(&user_id).unwrap();
        let result = service.verify(&token);

        // then (期待する結果):
        assert_eq!(result, Err(TokenError::Invalid));
    }

    #[test]
    fn test_verify_rejects_wrong_secret() {
        // テスト項目: 別の秘密鍵で署名したトークンが拒否される
        // given (前提条件):
        let issuer = JwtTokenService::with_default_validity("secret-a");
        let verifier = JwtTokenService::with_default_validity("secret-b");
        let user_id = UserId::generate();

        // when (操作):
        let token = issuer.issue(&user_id).unwrap();
        let result = verifier.verify(&token);

        // then (期待する結果):
        assert_eq!(result, Err(TokenError::Invalid));
    }
}
