use axum::{
    Json,
    extract::{OriginalUri, State},
    http::{HeaderName, StatusCode, header},
};

use crate::{
    AppState,
    app::created_location,
    error::{ApiError, ApiResult, required},
    extractors::folder::FoundFolder,
    folders::repo::{FolderChanges, NewFolder},
};

use super::dto::{CreateFolderRequest, FolderDto, UpdateFolderRequest};

pub const EMPTY_FOLDER_UPDATE: &str = "Request must contain something";

#[utoipa::path(
    get,
    path = "/api/folders",
    responses(
        (status = 200, description = "All folders", body = [FolderDto]),
        (status = 500, description = "Internal server error", body = crate::error::ErrorBody)
    ),
    tag = "Folders"
)]
pub async fn list_folders(
    State(state): State<AppState>,
) -> ApiResult<(StatusCode, Json<Vec<FolderDto>>)> {
    let rows = state.folders.get_all().await?;
    let folders = rows.into_iter().map(FolderDto::from).collect();

    Ok((StatusCode::OK, Json(folders)))
}

#[utoipa::path(
    post,
    path = "/api/folders",
    request_body = CreateFolderRequest,
    responses(
        (status = 201, description = "Folder created", body = FolderDto,
            headers(("Location" = String, description = "Path of the new folder"))),
        (status = 400, description = "Missing folder_name", body = crate::error::ErrorBody),
        (status = 500, description = "Internal server error", body = crate::error::ErrorBody)
    ),
    tag = "Folders"
)]
pub async fn create_folder(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Json(request): Json<CreateFolderRequest>,
) -> ApiResult<(StatusCode, [(HeaderName, String); 1], Json<FolderDto>)> {
    let folder_name = required(request.folder_name, "folder_name")?;

    let folder = state
        .folders
        .insert_folder(NewFolder { folder_name })
        .await?;
    tracing::info!(folder_id = folder.id, "folder created");

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, created_location(&uri, folder.id))],
        Json(FolderDto::from(folder)),
    ))
}

#[utoipa::path(
    get,
    path = "/api/folders/{id}",
    params(
        ("id" = i32, Path, description = "Folder id")
    ),
    responses(
        (status = 200, description = "Folder", body = FolderDto),
        (status = 404, description = "Folder not found", body = crate::error::ErrorBody),
        (status = 500, description = "Internal server error", body = crate::error::ErrorBody)
    ),
    tag = "Folders"
)]
pub async fn get_folder(
    FoundFolder(folder): FoundFolder,
) -> ApiResult<(StatusCode, Json<FolderDto>)> {
    Ok((StatusCode::OK, Json(FolderDto::from(folder))))
}

#[utoipa::path(
    delete,
    path = "/api/folders/{id}",
    params(
        ("id" = i32, Path, description = "Folder id")
    ),
    responses(
        (status = 204, description = "Folder deleted"),
        (status = 404, description = "Folder not found", body = crate::error::ErrorBody),
        (status = 500, description = "Internal server error", body = crate::error::ErrorBody)
    ),
    tag = "Folders"
)]
pub async fn delete_folder(
    State(state): State<AppState>,
    FoundFolder(folder): FoundFolder,
) -> ApiResult<StatusCode> {
    let deleted = state.folders.delete_by_id(folder.id).await?;
    tracing::info!(folder_id = folder.id, deleted, "folder deleted");

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    patch,
    path = "/api/folders/{id}",
    params(
        ("id" = i32, Path, description = "Folder id")
    ),
    request_body = UpdateFolderRequest,
    responses(
        (status = 204, description = "Folder updated"),
        (status = 400, description = "Nothing to update", body = crate::error::ErrorBody),
        (status = 404, description = "Folder not found", body = crate::error::ErrorBody),
        (status = 500, description = "Internal server error", body = crate::error::ErrorBody)
    ),
    tag = "Folders"
)]
pub async fn update_folder(
    State(state): State<AppState>,
    FoundFolder(folder): FoundFolder,
    Json(request): Json<UpdateFolderRequest>,
) -> ApiResult<StatusCode> {
    let changes = FolderChanges {
        folder_name: request.folder_name,
    };
    if changes.is_empty() {
        return Err(ApiError::BadRequest(EMPTY_FOLDER_UPDATE.to_string()));
    }

    state.folders.update_by_id(folder.id, changes).await?;

    Ok(StatusCode::NO_CONTENT)
}
