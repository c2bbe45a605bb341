//! REST API error responses.
//!
//! Every REST failure becomes a `{"error": …}` JSON body with a meaningful
//! status code. This deliberately contrasts with the realtime path, which is
//! fire-and-forget and never naks.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::usecase::error::{
    GetRoomDetailError, LoginError, NoteError, ProfileError, SignupError,
};

/// REST API error
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

impl From<SignupError> for ApiError {
    fn from(error: SignupError) -> Self {
        match error {
            SignupError::Validation(e) => Self::bad_request(e.to_string()),
            SignupError::DuplicateAccount => Self::conflict(error.to_string()),
            SignupError::Hash(_) | SignupError::Token(_) => Self::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "server error during signup",
            ),
        }
    }
}

impl From<LoginError> for ApiError {
    fn from(error: LoginError) -> Self {
        match error {
            LoginError::InvalidCredentials => Self::unauthorized("invalid credentials"),
            LoginError::Token(_) => Self::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "server error during login",
            ),
        }
    }
}

impl From<ProfileError> for ApiError {
    fn from(error: ProfileError) -> Self {
        match error {
            ProfileError::UserNotFound => Self::not_found(error.to_string()),
            ProfileError::Validation(e) => Self::bad_request(e.to_string()),
        }
    }
}

impl From<NoteError> for ApiError {
    fn from(error: NoteError) -> Self {
        match error {
            NoteError::NotFound => Self::not_found(error.to_string()),
            NoteError::AccessDenied => Self::forbidden(error.to_string()),
            NoteError::Validation(e) => Self::bad_request(e.to_string()),
            NoteError::Storage => Self::new(StatusCode::INTERNAL_SERVER_ERROR, "server error"),
        }
    }
}

impl From<GetRoomDetailError> for ApiError {
    fn from(error: GetRoomDetailError) -> Self {
        match error {
            GetRoomDetailError::RoomNotFound => Self::not_found(error.to_string()),
        }
    }
}
