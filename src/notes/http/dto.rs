use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use utoipa::ToSchema;

use crate::{notes::repo::Note, sanitize::sanitize, truthy};

#[derive(Deserialize, ToSchema)]
pub struct CreateNoteRequest {
    pub note_name: Option<String>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub modified: Option<OffsetDateTime>,
    pub folderid: Option<i32>,
    pub content: Option<String>,
}

/// Falsy values (`null`, `false`, `0`, `""`) count as absent.
#[derive(Deserialize, ToSchema)]
pub struct UpdateNoteRequest {
    #[serde(default, deserialize_with = "truthy::string")]
    pub note_name: Option<String>,
    #[serde(default, deserialize_with = "truthy::timestamp")]
    pub modified: Option<OffsetDateTime>,
    #[serde(default, alias = "folderId", deserialize_with = "truthy::id")]
    pub folderid: Option<i32>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct NoteDto {
    pub id: i32,
    pub folderid: i32,
    pub note_name: String,
    #[serde(with = "time::serde::rfc3339")]
    pub modified: OffsetDateTime,
    pub content: String,
}

impl From<Note> for NoteDto {
    fn from(note: Note) -> Self {
        NoteDto {
            id: note.id,
            folderid: note.folderid,
            note_name: sanitize(&note.note_name),
            modified: note.modified,
            content: sanitize(note.content.as_deref().unwrap_or_default()),
        }
    }
}
