//! Note endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

use crate::{
    domain::NoteId,
    infrastructure::dto::http::{
        CreateNoteRequest, MessageResponse, NoteDto, NoteQueryParams, NoteResponse, NotesPageDto,
        SummaryResponse, UpdateNoteRequest,
    },
    ui::{
        error::ApiError,
        extract::{AuthUser, OptionalAuthUser},
        state::AppState,
    },
    usecase::{CreateNoteInput, ListNotesInput, UpdateNoteInput},
};

fn parse_note_id(raw: String) -> Result<NoteId, ApiError> {
    NoteId::new(raw).map_err(|e| ApiError::bad_request(e.to_string()))
}

/// POST /api/notes
pub async fn create_note(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Json(request): Json<CreateNoteRequest>,
) -> Result<(StatusCode, Json<NoteResponse>), ApiError> {
    let note = state
        .create_note_usecase
        .execute(
            &user.id,
            CreateNoteInput {
                title: request.title,
                content: request.content,
                tags: request.tags,
                is_public: request.is_public,
                study_room: request.study_room,
            },
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(NoteResponse {
            message: "Note created successfully".to_string(),
            note: NoteDto::from(note),
        }),
    ))
}

/// GET /api/notes
pub async fn list_notes(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Query(params): Query<NoteQueryParams>,
) -> Result<Json<NotesPageDto>, ApiError> {
    let (page, limit, current_page) = state
        .list_notes_usecase
        .execute(
            &user.id,
            ListNotesInput {
                page: params.page,
                limit: params.limit,
                search: params.search,
                tags: params.tags,
                study_room: params.study_room,
            },
        )
        .await?;

    Ok(Json(NotesPageDto {
        total: page.total,
        total_pages: page.total.div_ceil(limit),
        current_page,
        notes: page.notes.into_iter().map(NoteDto::from).collect(),
    }))
}

/// GET /api/notes/{id}
pub async fn get_note(
    State(state): State<Arc<AppState>>,
    OptionalAuthUser(user): OptionalAuthUser,
    Path(note_id): Path<String>,
) -> Result<Json<NoteDto>, ApiError> {
    let note_id = parse_note_id(note_id)?;
    let viewer = user.as_ref().map(|u| &u.id);
    let note = state.get_note_usecase.execute(viewer, &note_id).await?;
    Ok(Json(NoteDto::from(note)))
}

/// PUT /api/notes/{id}
pub async fn update_note(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(note_id): Path<String>,
    Json(request): Json<UpdateNoteRequest>,
) -> Result<Json<NoteResponse>, ApiError> {
    let note_id = parse_note_id(note_id)?;
    let note = state
        .update_note_usecase
        .execute(
            &user.id,
            &note_id,
            UpdateNoteInput {
                title: request.title,
                content: request.content,
                tags: request.tags,
                is_public: request.is_public,
            },
        )
        .await?;

    Ok(Json(NoteResponse {
        message: "Note updated successfully".to_string(),
        note: NoteDto::from(note),
    }))
}

/// DELETE /api/notes/{id}
pub async fn delete_note(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(note_id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let note_id = parse_note_id(note_id)?;
    state.delete_note_usecase.execute(&user.id, &note_id).await?;
    Ok(Json(MessageResponse {
        message: "Note deleted successfully".to_string(),
    }))
}

/// POST /api/notes/{id}/ai-summary
pub async fn summarize_note(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(note_id): Path<String>,
) -> Result<Json<SummaryResponse>, ApiError> {
    let note_id = parse_note_id(note_id)?;
    let note = state
        .summarize_note_usecase
        .execute(&user.id, &note_id)
        .await?;

    // execute() だけが ai_summary を設定するため、ここでは必ず存在する
    let summary = note.ai_summary.expect("summary was just generated");
    Ok(Json(SummaryResponse {
        message: "AI summary generated successfully".to_string(),
        summary: summary.into(),
    }))
}
