use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::{error::StoreError, memory::Table};

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Folder {
    pub id: i32,
    pub folder_name: String,
}

#[derive(Debug, Clone)]
pub struct NewFolder {
    pub folder_name: String,
}

/// Fields to overwrite on an existing folder. `None` leaves the column alone.
#[derive(Debug, Clone, Default)]
pub struct FolderChanges {
    pub folder_name: Option<String>,
}

impl FolderChanges {
    pub fn is_empty(&self) -> bool {
        self.folder_name.is_none()
    }
}

#[async_trait]
pub trait FolderRepo: Send + Sync {
    /// All folders in insertion order.
    async fn get_all(&self) -> Result<Vec<Folder>, StoreError>;

    async fn insert_folder(&self, new_folder: NewFolder) -> Result<Folder, StoreError>;

    async fn get_by_id(&self, id: i32) -> Result<Option<Folder>, StoreError>;

    /// Returns the number of rows removed.
    async fn delete_by_id(&self, id: i32) -> Result<u64, StoreError>;

    /// Returns the number of rows changed.
    async fn update_by_id(&self, id: i32, changes: FolderChanges) -> Result<u64, StoreError>;
}

pub struct PgFolderRepo {
    db: PgPool,
}

impl PgFolderRepo {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl FolderRepo for PgFolderRepo {
    async fn get_all(&self) -> Result<Vec<Folder>, StoreError> {
        let rows = sqlx::query_as::<_, Folder>(
            r#"
            SELECT id, folder_name
            FROM noteful_folders
            ORDER BY id
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows)
    }

    async fn insert_folder(&self, new_folder: NewFolder) -> Result<Folder, StoreError> {
        let row = sqlx::query_as::<_, Folder>(
            r#"
            INSERT INTO noteful_folders (folder_name)
            VALUES ($1)
            RETURNING id, folder_name
            "#,
        )
        .bind(new_folder.folder_name)
        .fetch_one(&self.db)
        .await?;

        Ok(row)
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<Folder>, StoreError> {
        let may_be_record = sqlx::query_as::<_, Folder>(
            r#"
            SELECT id, folder_name
            FROM noteful_folders
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;

        Ok(may_be_record)
    }

    async fn delete_by_id(&self, id: i32) -> Result<u64, StoreError> {
        let res = sqlx::query(
            r#"
            DELETE FROM noteful_folders
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.db)
        .await?;

        Ok(res.rows_affected())
    }

    async fn update_by_id(&self, id: i32, changes: FolderChanges) -> Result<u64, StoreError> {
        if changes.is_empty() {
            return Ok(0);
        }

        let mut query = QueryBuilder::<Postgres>::new("UPDATE noteful_folders SET ");
        {
            let mut set = query.separated(", ");
            if let Some(folder_name) = changes.folder_name {
                set.push("folder_name = ").push_bind_unseparated(folder_name);
            }
        }
        query.push(" WHERE id = ").push_bind(id);

        let res = query.build().execute(&self.db).await?;
        Ok(res.rows_affected())
    }
}

#[derive(Default)]
pub struct MemoryFolderRepo {
    table: Table<Folder>,
}

impl MemoryFolderRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulates a lost database connection.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.table.set_unavailable(unavailable);
    }
}

#[async_trait]
impl FolderRepo for MemoryFolderRepo {
    async fn get_all(&self) -> Result<Vec<Folder>, StoreError> {
        Ok(self.table.lock()?.all())
    }

    async fn insert_folder(&self, new_folder: NewFolder) -> Result<Folder, StoreError> {
        Ok(self.table.lock()?.insert(|id| Folder {
            id,
            folder_name: new_folder.folder_name,
        }))
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<Folder>, StoreError> {
        Ok(self.table.lock()?.get(id))
    }

    async fn delete_by_id(&self, id: i32) -> Result<u64, StoreError> {
        Ok(self.table.lock()?.remove(id))
    }

    async fn update_by_id(&self, id: i32, changes: FolderChanges) -> Result<u64, StoreError> {
        if changes.is_empty() {
            return Ok(0);
        }

        let mut rows = self.table.lock()?;
        let Some(folder) = rows.get_mut(id) else {
            return Ok(0);
        };
        if let Some(folder_name) = changes.folder_name {
            folder.folder_name = folder_name;
        }
        Ok(1)
    }
}
