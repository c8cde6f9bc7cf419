use axum::{
    Json,
    extract::{OriginalUri, State},
    http::{HeaderName, StatusCode, header},
};

use crate::{
    AppState,
    app::created_location,
    error::{ApiError, ApiResult, required},
    extractors::note::FoundNote,
    notes::repo::{NewNote, NoteChanges},
};

use super::dto::{CreateNoteRequest, NoteDto, UpdateNoteRequest};

pub const EMPTY_NOTE_UPDATE: &str =
    "Request body must contain either 'note_name', 'folderId' or 'modified'";

#[utoipa::path(
    get,
    path = "/api/notes",
    responses(
        (status = 200, description = "All notes", body = [NoteDto]),
        (status = 500, description = "Internal server error", body = crate::error::ErrorBody)
    ),
    tag = "Notes"
)]
pub async fn list_notes(
    State(state): State<AppState>,
) -> ApiResult<(StatusCode, Json<Vec<NoteDto>>)> {
    let rows = state.notes.get_all().await?;
    let notes = rows.into_iter().map(NoteDto::from).collect();

    Ok((StatusCode::OK, Json(notes)))
}

#[utoipa::path(
    post,
    path = "/api/notes",
    request_body = CreateNoteRequest,
    responses(
        (status = 201, description = "Note created", body = NoteDto,
            headers(("Location" = String, description = "Path of the new note"))),
        (status = 400, description = "Missing required field", body = crate::error::ErrorBody),
        (status = 500, description = "Internal server error", body = crate::error::ErrorBody)
    ),
    tag = "Notes"
)]
pub async fn create_note(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Json(request): Json<CreateNoteRequest>,
) -> ApiResult<(StatusCode, [(HeaderName, String); 1], Json<NoteDto>)> {
    let new_note = NewNote {
        note_name: required(request.note_name, "note_name")?,
        modified: required(request.modified, "modified")?,
        folderid: required(request.folderid, "folderid")?,
        content: request.content,
    };

    let note = state.notes.insert_note(new_note).await?;
    tracing::info!(note_id = note.id, folderid = note.folderid, "note created");

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, created_location(&uri, note.id))],
        Json(NoteDto::from(note)),
    ))
}

#[utoipa::path(
    get,
    path = "/api/notes/{id}",
    params(
        ("id" = i32, Path, description = "Note id")
    ),
    responses(
        (status = 200, description = "Note", body = NoteDto),
        (status = 404, description = "Note not found", body = crate::error::ErrorBody),
        (status = 500, description = "Internal server error", body = crate::error::ErrorBody)
    ),
    tag = "Notes"
)]
pub async fn get_note(FoundNote(note): FoundNote) -> ApiResult<(StatusCode, Json<NoteDto>)> {
    Ok((StatusCode::OK, Json(NoteDto::from(note))))
}

#[utoipa::path(
    delete,
    path = "/api/notes/{id}",
    params(
        ("id" = i32, Path, description = "Note id")
    ),
    responses(
        (status = 204, description = "Note deleted"),
        (status = 404, description = "Note not found", body = crate::error::ErrorBody),
        (status = 500, description = "Internal server error", body = crate::error::ErrorBody)
    ),
    tag = "Notes"
)]
pub async fn delete_note(
    State(state): State<AppState>,
    FoundNote(note): FoundNote,
) -> ApiResult<StatusCode> {
    let deleted = state.notes.delete_by_id(note.id).await?;
    tracing::info!(note_id = note.id, deleted, "note deleted");

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    patch,
    path = "/api/notes/{id}",
    params(
        ("id" = i32, Path, description = "Note id")
    ),
    request_body = UpdateNoteRequest,
    responses(
        (status = 204, description = "Note updated"),
        (status = 400, description = "Nothing to update", body = crate::error::ErrorBody),
        (status = 404, description = "Note not found", body = crate::error::ErrorBody),
        (status = 500, description = "Internal server error", body = crate::error::ErrorBody)
    ),
    tag = "Notes"
)]
pub async fn update_note(
    State(state): State<AppState>,
    FoundNote(note): FoundNote,
    Json(request): Json<UpdateNoteRequest>,
) -> ApiResult<StatusCode> {
    let changes = NoteChanges {
        note_name: request.note_name,
        modified: request.modified,
        folderid: request.folderid,
    };
    if changes.is_empty() {
        return Err(ApiError::BadRequest(EMPTY_NOTE_UPDATE.to_string()));
    }

    state.notes.update_by_id(note.id, changes).await?;

    Ok(StatusCode::NO_CONTENT)
}
