use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{folders::repo::Folder, sanitize::sanitize, truthy};

#[derive(Deserialize, ToSchema)]
pub struct CreateFolderRequest {
    pub folder_name: Option<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct UpdateFolderRequest {
    #[serde(default, deserialize_with = "truthy::string")]
    pub folder_name: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FolderDto {
    pub id: i32,
    pub folder_name: String,
}

impl From<Folder> for FolderDto {
    fn from(folder: Folder) -> Self {
        FolderDto {
            id: folder.id,
            folder_name: sanitize(&folder.folder_name),
        }
    }
}
