/// Note endpoints
///
/// Notes are free-standing team bulletin entries, attached to a team by
/// name and stamped with the posting member's name and email:
///
/// ```text
/// POST   /notes/create           - Post a note
/// GET    /notes                  - All notes, newest first
/// GET    /notes/team/:team_name  - One team's notes, newest first
/// GET    /notes/:id              - Fetch a note
/// PUT    /notes/:id              - Update heading and text
/// DELETE /notes/:id              - Delete, returning the removed note
/// ```

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    json::Json,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use huddle_shared::models::note::{CreateNote, Note, UpdateNote};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Note creation request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNoteRequest {
    /// Short title
    pub heading: String,

    /// Note body
    pub text: String,

    /// Display name of the posting member
    pub member_name: String,

    /// Email of the posting member
    pub member_email: String,

    /// Name of the team the note belongs to
    pub team_name: String,
}

/// Note update request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNoteRequest {
    /// Replacement title
    pub heading: String,

    /// Replacement body
    pub text: String,
}

/// Single-note response
#[derive(Debug, Serialize)]
pub struct NoteResponse {
    pub note: Note,
}

/// Note listing response
#[derive(Debug, Serialize)]
pub struct NotesResponse {
    pub notes: Vec<Note>,
}

/// Posts a new note
///
/// # Endpoint
///
/// ```text
/// POST /notes/create
/// {"heading": "Standup", "text": "Moved to 10am", "memberName": "Ada",
///  "memberEmail": "ada@example.com", "teamName": "Platform"}
/// ```
pub async fn create_note(
    State(state): State<AppState>,
    Json(req): Json<CreateNoteRequest>,
) -> ApiResult<(StatusCode, Json<NoteResponse>)> {
    if req.heading.trim().is_empty() || req.text.trim().is_empty() {
        return Err(ApiError::Validation(
            "heading and text are required".to_string(),
        ));
    }
    if req.member_name.trim().is_empty()
        || req.member_email.trim().is_empty()
        || req.team_name.trim().is_empty()
    {
        return Err(ApiError::Validation(
            "memberName, memberEmail, and teamName are required".to_string(),
        ));
    }

    let note = Note::create(
        &state.db,
        CreateNote {
            heading: req.heading.trim().to_string(),
            text: req.text,
            member_name: req.member_name.trim().to_string(),
            member_email: req.member_email.trim().to_string(),
            team_name: req.team_name.trim().to_string(),
        },
    )
    .await?;

    tracing::info!(note_id = %note.id, team = %note.team_name, "note created");

    Ok((StatusCode::CREATED, Json(NoteResponse { note })))
}

/// Lists all notes, newest first
pub async fn list_notes(State(state): State<AppState>) -> ApiResult<Json<NotesResponse>> {
    let notes = Note::list(&state.db).await?;
    Ok(Json(NotesResponse { notes }))
}

/// Lists one team's notes, newest first
pub async fn list_team_notes(
    State(state): State<AppState>,
    Path(team_name): Path<String>,
) -> ApiResult<Json<NotesResponse>> {
    let notes = Note::list_by_team(&state.db, &team_name).await?;
    Ok(Json(NotesResponse { notes }))
}

/// Fetches a single note by ID
pub async fn get_note(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<NoteResponse>> {
    let note = Note::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("No note with id {}", id)))?;

    Ok(Json(NoteResponse { note }))
}

/// Replaces a note's heading and text
///
/// # Endpoint
///
/// ```text
/// PUT /notes/:id
/// {"heading": "Standup", "text": "Back to 9am"}
/// ```
pub async fn update_note(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateNoteRequest>,
) -> ApiResult<Json<NoteResponse>> {
    if req.heading.trim().is_empty() || req.text.trim().is_empty() {
        return Err(ApiError::Validation(
            "heading and text are required".to_string(),
        ));
    }

    let note = Note::update(
        &state.db,
        id,
        UpdateNote {
            heading: req.heading.trim().to_string(),
            text: req.text,
        },
    )
    .await?
    .ok_or_else(|| ApiError::NotFound(format!("No note with id {}", id)))?;

    Ok(Json(NoteResponse { note }))
}

/// Deletes a note, returning the removed row
pub async fn delete_note(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<NoteResponse>> {
    let note = Note::delete(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("No note with id {}", id)))?;

    tracing::info!(note_id = %note.id, team = %note.team_name, "note deleted");

    Ok(Json(NoteResponse { note }))
}
