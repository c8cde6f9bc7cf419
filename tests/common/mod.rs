#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{HeaderMap, Method, Request, StatusCode, header},
};
use noteful::{
    AppState,
    app::router::build_router,
    folders::repo::{FolderRepo, MemoryFolderRepo, NewFolder},
    notes::repo::{MemoryNoteRepo, NewNote, NoteRepo},
};
use serde_json::{Value, json};
use time::OffsetDateTime;
use tower::ServiceExt;

pub const FOLDER_NOT_FOUND: &str = "User doesn't exist";
pub const NOTE_NOT_FOUND: &str = "Note not exist";

pub struct TestApp {
    app: Router,
    pub folders: Arc<MemoryFolderRepo>,
    pub notes: Arc<MemoryNoteRepo>,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestResponse {
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
    }

    pub fn error_message(&self) -> Option<&str> {
        self.body
            .get("error")
            .and_then(|e| e.get("message"))
            .and_then(Value::as_str)
    }
}

pub fn error_body(message: &str) -> Value {
    json!({ "error": { "message": message } })
}

impl TestApp {
    pub fn new() -> Self {
        let folders = Arc::new(MemoryFolderRepo::new());
        let notes = Arc::new(MemoryNoteRepo::new());
        let state = AppState::new(folders.clone(), notes.clone());

        Self {
            app: build_router(state),
            folders,
            notes,
        }
    }

    pub async fn seed_folder(&self, folder_name: &str) -> i32 {
        self.folders
            .insert_folder(NewFolder {
                folder_name: folder_name.to_string(),
            })
            .await
            .expect("failed to seed folder")
            .id
    }

    pub async fn seed_note(&self, note_name: &str, folderid: i32, content: Option<&str>) -> i32 {
        self.notes
            .insert_note(NewNote {
                note_name: note_name.to_string(),
                modified: OffsetDateTime::UNIX_EPOCH,
                folderid,
                content: content.map(str::to_string),
            })
            .await
            .expect("failed to seed note")
            .id
    }

    pub async fn post_json(&self, path: &str, body: Value) -> TestResponse {
        self.request(Method::POST, path, Some(body)).await
    }

    pub async fn patch_json(&self, path: &str, body: Value) -> TestResponse {
        self.request(Method::PATCH, path, Some(body)).await
    }

    pub async fn get_json(&self, path: &str) -> TestResponse {
        self.request(Method::GET, path, None).await
    }

    pub async fn get_text(&self, path: &str) -> (StatusCode, String) {
        let (status, _, bytes) = self.send(Method::GET, path, None).await;
        let text = String::from_utf8(bytes).expect("response is not valid utf-8 text");
        (status, text)
    }

    pub async fn delete(&self, path: &str) -> TestResponse {
        self.request(Method::DELETE, path, None).await
    }

    async fn request(&self, method: Method, path: &str, body: Option<Value>) -> TestResponse {
        let (status, headers, bytes) = self.send(method, path, body).await;

        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("response is not valid json")
        };

        TestResponse {
            status,
            headers,
            body,
        }
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> (StatusCode, HeaderMap, Vec<u8>) {
        let mut req_builder = Request::builder().method(method).uri(path);

        let body = match body {
            Some(body) => {
                req_builder = req_builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(serde_json::to_vec(&body).expect("failed to serialize request body"))
            }
            None => Body::empty(),
        };

        let req = req_builder.body(body).expect("failed to build request");
        let response = self
            .app
            .clone()
            .oneshot(req)
            .await
            .expect("request execution failed");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("failed to read response body");

        (status, headers, bytes.to_vec())
    }
}
