use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;

use crate::{
    config::Config,
    error::StartupError,
    folders::repo::{FolderRepo, MemoryFolderRepo, PgFolderRepo},
    notes::repo::{MemoryNoteRepo, NoteRepo, PgNoteRepo},
};

pub mod app;
pub mod config;
pub mod core;
pub mod error;
mod extractors;
pub mod folders;
pub mod memory;
pub mod notes;
pub mod sanitize;
mod truthy;

#[derive(Clone)]
pub struct AppState {
    pub folders: Arc<dyn FolderRepo>,
    pub notes: Arc<dyn NoteRepo>,
}

impl AppState {
    pub fn new(folders: Arc<dyn FolderRepo>, notes: Arc<dyn NoteRepo>) -> Self {
        Self { folders, notes }
    }

    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(MemoryFolderRepo::new()),
            Arc::new(MemoryNoteRepo::new()),
        )
    }

    /// Builds the stores described by `config`: Postgres when a database URL
    /// is set, memory otherwise.
    pub async fn from_config(config: &Config) -> Result<Self, StartupError> {
        let Some(database_url) = config.database_url.as_deref() else {
            tracing::warn!("DATABASE_URL is not set, data is kept in memory only");
            return Ok(Self::in_memory());
        };

        let db = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(database_url)
            .await
            .map_err(StartupError::Connect)?;

        if config.run_migrations {
            sqlx::migrate!().run(&db).await?;
            tracing::info!("migrations applied");
        }

        Ok(Self::new(
            Arc::new(PgFolderRepo::new(db.clone())),
            Arc::new(PgNoteRepo::with_folder_column(
                db,
                config.note_folder_column.clone(),
            )),
        ))
    }
}
