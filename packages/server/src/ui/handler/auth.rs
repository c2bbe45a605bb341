//! Account endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode};

use crate::{
    infrastructure::dto::http::{
        AuthResponse, LoginRequest, MessageResponse, SignupRequest, UpdateProfileRequest, UserDto,
    },
    ui::{error::ApiError, extract::AuthUser, state::AppState},
    usecase::SignupInput,
};

/// POST /api/auth/signup
pub async fn signup(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SignupRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    let (user, token) = state
        .signup_user_usecase
        .execute(SignupInput {
            username: request.username,
            email: request.email,
            password: request.password,
            display_name: request.display_name,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            message: "User created successfully".to_string(),
            token,
            user: UserDto::from(user),
        }),
    ))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let (user, token) = state
        .login_user_usecase
        .execute(&request.email, &request.password)
        .await?;

    Ok(Json(AuthResponse {
        message: "Login successful".to_string(),
        token,
        user: UserDto::from(user),
    }))
}

/// GET /api/auth/me
pub async fn me(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
) -> Result<Json<UserDto>, ApiError> {
    // Re-read so a concurrent profile update is reflected
    let user = state.get_user_profile_usecase.execute(&user.id).await?;
    Ok(Json(UserDto::from(user)))
}

/// PUT /api/auth/profile
pub async fn update_profile(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<Json<UserDto>, ApiError> {
    let updated = state
        .update_user_profile_usecase
        .execute(&user.id, request.display_name)
        .await?;
    Ok(Json(UserDto::from(updated)))
}

/// POST /api/auth/logout
///
/// Tokens are stateless; logout is an acknowledgement and the client drops
/// its token.
pub async fn logout() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Logout successful".to_string(),
    })
}
