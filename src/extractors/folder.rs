use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

use crate::{AppState, error::ApiError, folders::repo::Folder};

pub const FOLDER_NOT_FOUND: &str = "User doesn't exist";

/// The folder named by the `{id}` path segment.
///
/// Rejects with 404 before the handler or its body extractor runs.
#[derive(Debug, Clone)]
pub struct FoundFolder(pub Folder);

impl FromRequestParts<AppState> for FoundFolder {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // an id that is not an integer cannot match any row
        let Path(folder_id) = Path::<i32>::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::NotFound(FOLDER_NOT_FOUND))?;

        let folder = state.folders.get_by_id(folder_id).await?;
        let folder = folder.ok_or_else(|| {
            tracing::debug!(folder_id, "folder not found");
            ApiError::NotFound(FOLDER_NOT_FOUND)
        })?;

        Ok(FoundFolder(folder))
    }
}
