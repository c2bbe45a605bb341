//! HTTP API endpoint handlers (health and room observability).

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
};

use crate::{
    domain::RoomKey,
    infrastructure::dto::http::{RoomDetailDto, RoomSummaryDto},
    ui::{error::ApiError, state::AppState},
};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "ok": true }))
}

/// Get list of rooms
pub async fn get_rooms(State(state): State<Arc<AppState>>) -> Json<Vec<RoomSummaryDto>> {
    let rooms = state.get_rooms_usecase.execute().await;

    // Domain Model から DTO への変換
    let summaries = rooms.iter().map(RoomSummaryDto::from).collect();
    Json(summaries)
}

/// Get room detail by key
pub async fn get_room_detail(
    State(state): State<Arc<AppState>>,
    Path(room_key): Path<String>,
) -> Result<Json<RoomDetailDto>, ApiError> {
    let key = RoomKey::new(room_key).map_err(|e| ApiError::bad_request(e.to_string()))?;
    let room = state.get_room_detail_usecase.execute(&key).await?;
    Ok(Json(RoomDetailDto::from(&room)))
}
