use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use time::OffsetDateTime;

use crate::{config::DEFAULT_NOTE_FOLDER_COLUMN, error::StoreError, memory::Table};

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Note {
    pub id: i32,
    pub note_name: String,
    pub modified: OffsetDateTime,
    pub folderid: i32,
    pub content: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewNote {
    pub note_name: String,
    pub modified: OffsetDateTime,
    pub folderid: i32,
    pub content: Option<String>,
}

/// Fields to overwrite on an existing note. `None` leaves the column alone.
#[derive(Debug, Clone, Default)]
pub struct NoteChanges {
    pub note_name: Option<String>,
    pub modified: Option<OffsetDateTime>,
    pub folderid: Option<i32>,
}

impl NoteChanges {
    pub fn is_empty(&self) -> bool {
        self.note_name.is_none() && self.modified.is_none() && self.folderid.is_none()
    }
}

#[async_trait]
pub trait NoteRepo: Send + Sync {
    /// All notes in insertion order.
    async fn get_all(&self) -> Result<Vec<Note>, StoreError>;

    async fn insert_note(&self, new_note: NewNote) -> Result<Note, StoreError>;

    async fn get_by_id(&self, id: i32) -> Result<Option<Note>, StoreError>;

    /// Returns the number of rows removed.
    async fn delete_by_id(&self, id: i32) -> Result<u64, StoreError>;

    /// Returns the number of rows changed.
    async fn update_by_id(&self, id: i32, changes: NoteChanges) -> Result<u64, StoreError>;
}

pub struct PgNoteRepo {
    db: PgPool,
    folder_column: String,
}

impl PgNoteRepo {
    pub fn new(db: PgPool) -> Self {
        Self::with_folder_column(db, DEFAULT_NOTE_FOLDER_COLUMN)
    }

    /// `folder_column` is spliced into SQL and must be a plain identifier.
    pub fn with_folder_column(db: PgPool, folder_column: impl Into<String>) -> Self {
        Self {
            db,
            folder_column: folder_column.into(),
        }
    }

    fn columns(&self) -> String {
        format!(
            "id, note_name, modified, {} AS folderid, content",
            self.folder_column
        )
    }
}

#[async_trait]
impl NoteRepo for PgNoteRepo {
    async fn get_all(&self) -> Result<Vec<Note>, StoreError> {
        let sql = format!("SELECT {} FROM noteful_notes ORDER BY id", self.columns());
        let rows = sqlx::query_as::<_, Note>(&sql).fetch_all(&self.db).await?;

        Ok(rows)
    }

    async fn insert_note(&self, new_note: NewNote) -> Result<Note, StoreError> {
        let sql = format!(
            r#"
            INSERT INTO noteful_notes (note_name, modified, {}, content)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            self.folder_column,
            self.columns()
        );
        let row = sqlx::query_as::<_, Note>(&sql)
            .bind(new_note.note_name)
            .bind(new_note.modified)
            .bind(new_note.folderid)
            .bind(new_note.content)
            .fetch_one(&self.db)
            .await?;

        Ok(row)
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<Note>, StoreError> {
        let sql = format!("SELECT {} FROM noteful_notes WHERE id = $1", self.columns());
        let may_be_record = sqlx::query_as::<_, Note>(&sql)
            .bind(id)
            .fetch_optional(&self.db)
            .await?;

        Ok(may_be_record)
    }

    async fn delete_by_id(&self, id: i32) -> Result<u64, StoreError> {
        let res = sqlx::query(
            r#"
            DELETE FROM noteful_notes
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.db)
        .await?;

        Ok(res.rows_affected())
    }

    async fn update_by_id(&self, id: i32, changes: NoteChanges) -> Result<u64, StoreError> {
        if changes.is_empty() {
            return Ok(0);
        }

        let mut query = QueryBuilder::<Postgres>::new("UPDATE noteful_notes SET ");
        {
            let mut set = query.separated(", ");
            if let Some(note_name) = changes.note_name {
                set.push("note_name = ").push_bind_unseparated(note_name);
            }
            if let Some(modified) = changes.modified {
                set.push("modified = ").push_bind_unseparated(modified);
            }
            if let Some(folderid) = changes.folderid {
                set.push(format!("{} = ", self.folder_column))
                    .push_bind_unseparated(folderid);
            }
        }
        query.push(" WHERE id = ").push_bind(id);

        let res = query.build().execute(&self.db).await?;
        Ok(res.rows_affected())
    }
}

#[derive(Default)]
pub struct MemoryNoteRepo {
    table: Table<Note>,
}

impl MemoryNoteRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulates a lost database connection.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.table.set_unavailable(unavailable);
    }
}

#[async_trait]
impl NoteRepo for MemoryNoteRepo {
    async fn get_all(&self) -> Result<Vec<Note>, StoreError> {
        Ok(self.table.lock()?.all())
    }

    async fn insert_note(&self, new_note: NewNote) -> Result<Note, StoreError> {
        Ok(self.table.lock()?.insert(|id| Note {
            id,
            note_name: new_note.note_name,
            modified: new_note.modified,
            folderid: new_note.folderid,
            content: new_note.content,
        }))
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<Note>, StoreError> {
        Ok(self.table.lock()?.get(id))
    }

    async fn delete_by_id(&self, id: i32) -> Result<u64, StoreError> {
        Ok(self.table.lock()?.remove(id))
    }

    async fn update_by_id(&self, id: i32, changes: NoteChanges) -> Result<u64, StoreError> {
        if changes.is_empty() {
            return Ok(0);
        }

        let mut rows = self.table.lock()?;
        let Some(note) = rows.get_mut(id) else {
            return Ok(0);
        };
        if let Some(note_name) = changes.note_name {
            note.note_name = note_name;
        }
        if let Some(modified) = changes.modified {
            note.modified = modified;
        }
        if let Some(folderid) = changes.folderid {
            note.folderid = folderid;
        }
        Ok(1)
    }
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;

    fn new_note(name: &str, folderid: i32) -> NewNote {
        NewNote {
            note_name: name.to_string(),
            modified: datetime!(2019-01-03 00:00 UTC),
            folderid,
            content: None,
        }
    }

    #[tokio::test]
    async fn memory_repo_partial_update_keeps_other_fields() {
        let repo = MemoryNoteRepo::new();
        let mut dogs = new_note("Dogs", 1);
        dogs.content = Some("Woof".to_string());
        let note = repo.insert_note(dogs).await.unwrap();

        let changed = repo
            .update_by_id(
                note.id,
                NoteChanges {
                    folderid: Some(2),
                    ..NoteChanges::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(changed, 1);

        let stored = repo.get_by_id(note.id).await.unwrap().unwrap();
        assert_eq!(stored.note_name, "Dogs");
        assert_eq!(stored.modified, note.modified);
        assert_eq!(stored.folderid, 2);
        assert_eq!(stored.content.as_deref(), Some("Woof"));
    }

    #[tokio::test]
    async fn memory_repo_lists_in_insertion_order_and_deletes() {
        let repo = MemoryNoteRepo::new();
        let first = repo.insert_note(new_note("Dogs", 1)).await.unwrap();
        let second = repo.insert_note(new_note("Cats", 1)).await.unwrap();

        let names: Vec<_> = repo
            .get_all()
            .await
            .unwrap()
            .into_iter()
            .map(|n| n.note_name)
            .collect();
        assert_eq!(names, vec!["Dogs", "Cats"]);

        assert_eq!(repo.delete_by_id(first.id).await.unwrap(), 1);
        assert_eq!(repo.get_all().await.unwrap(), vec![second]);
    }

    #[tokio::test]
    async fn unavailable_memory_repo_reports_store_error() {
        let repo = MemoryNoteRepo::new();
        repo.set_unavailable(true);
        assert!(matches!(
            repo.get_all().await,
            Err(StoreError::Unavailable(_))
        ));
    }
}
