//! Bearer-token authentication extractors.

use std::convert::Infallible;
use std::sync::Arc;

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::domain::{TokenService, User, UserRepository};

use super::{error::ApiError, state::AppState};

/// Extract a Bearer token from an Authorization header value.
fn bearer_token_from_header(header_value: &str) -> Option<&str> {
    let mut parts = header_value.split_whitespace();
    let scheme = parts.next()?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = parts.next()?;
    if token.is_empty() || parts.next().is_some() {
        return None;
    }
    Some(token)
}

async fn authenticate(parts: &Parts, state: &Arc<AppState>) -> Result<User, ApiError> {
    let header_value = parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| ApiError::unauthorized("no token, authorization denied"))?;

    let token = bearer_token_from_header(header_value)
        .ok_or_else(|| ApiError::unauthorized("no token, authorization denied"))?;

    let user_id = state
        .token_service
        .verify(token)
        .map_err(|_| ApiError::unauthorized("token is not valid"))?;

    state
        .user_repository
        .find_by_id(&user_id)
        .await
        .ok_or_else(|| ApiError::unauthorized("user not found"))
}

/// Rejects the request unless a valid Bearer token identifies a known user.
pub struct AuthUser(pub User);

impl FromRequestParts<Arc<AppState>> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        authenticate(parts, state).await.map(AuthUser)
    }
}

/// Like [`AuthUser`] but never rejects: an absent or invalid token simply
/// yields `None` (used by endpoints that serve public content).
pub struct OptionalAuthUser(pub Option<User>);

impl FromRequestParts<Arc<AppState>> for OptionalAuthUser {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        Ok(OptionalAuthUser(authenticate(parts, state).await.ok()))
    }
}
