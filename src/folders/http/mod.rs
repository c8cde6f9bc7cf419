use axum::{
    Router,
    routing::{get, post},
};

use crate::AppState;

mod dto;
pub(crate) mod handlers;

pub use dto::{CreateFolderRequest, FolderDto, UpdateFolderRequest};
pub use handlers::{create_folder, delete_folder, get_folder, list_folders, update_folder};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_folder).get(list_folders))
        .route(
            "/{id}",
            get(get_folder).delete(delete_folder).patch(update_folder),
        )
}
