use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(title = "Noteful API", description = "Folders and the notes filed in them"),
    paths(
        crate::core::http::handlers::health,
        crate::folders::http::handlers::list_folders,
        crate::folders::http::handlers::create_folder,
        crate::folders::http::handlers::get_folder,
        crate::folders::http::handlers::delete_folder,
        crate::folders::http::handlers::update_folder,
        crate::notes::http::handlers::list_notes,
        crate::notes::http::handlers::create_note,
        crate::notes::http::handlers::get_note,
        crate::notes::http::handlers::delete_note,
        crate::notes::http::handlers::update_note
    ),
    components(schemas(
        crate::error::ErrorBody,
        crate::error::ErrorMessage,
        crate::folders::http::CreateFolderRequest,
        crate::folders::http::UpdateFolderRequest,
        crate::folders::http::FolderDto,
        crate::notes::http::CreateNoteRequest,
        crate::notes::http::UpdateNoteRequest,
        crate::notes::http::NoteDto
    )),
    tags(
        (name = "Core", description = "Service endpoints"),
        (name = "Folders", description = "Folder endpoints"),
        (name = "Notes", description = "Note endpoints")
    )
)]
pub struct ApiDoc;
