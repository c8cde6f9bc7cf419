use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

use crate::{AppState, error::ApiError, notes::repo::Note};

pub const NOTE_NOT_FOUND: &str = "Note not exist";

/// The note named by the `{id}` path segment.
#[derive(Debug, Clone)]
pub struct FoundNote(pub Note);

impl FromRequestParts<AppState> for FoundNote {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Path(note_id) = Path::<i32>::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::NotFound(NOTE_NOT_FOUND))?;

        let note = state.notes.get_by_id(note_id).await?;
        let note = note.ok_or_else(|| {
            tracing::debug!(note_id, "note not found");
            ApiError::NotFound(NOTE_NOT_FOUND)
        })?;

        Ok(FoundNote(note))
    }
}
