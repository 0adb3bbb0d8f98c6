/// File information route.
mod details;

/// Team and idea file listing routes.
mod list;

/// Team and idea file upload routes.
mod upload;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use db::{file, DatabaseConnection};
use serde::Serialize;

/// File extensions accepted for upload.
pub(super) const ALLOWED_EXTENSIONS: &[&str] = &[
    "pdf", "png", "jpg", "jpeg", "doc", "docx", "ppt", "pptx", "xls", "xlsx", "txt", "zip",
];

/// Request body ceiling for uploads, kept above the stored file
/// size limit to leave room for multipart framing.
const UPLOAD_BODY_LIMIT: usize = 12 * 1024 * 1024;

/// Create a router that provides file upload and retrieval routes.
pub(crate) fn routes() -> Router<Arc<DatabaseConnection>> {
    Router::new()
        .route("/upload/team", post(upload::team))
        .route("/upload/idea/:id", post(upload::idea))
        .route("/team/:id", get(list::team))
        .route("/idea/:id", get(list::idea))
        .route("/:id", get(details::details))
        .layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT))
}

/// Serializable file metadata.
#[derive(Serialize)]
pub(super) struct FileData {
    pub id: i64,
    pub original_filename: String,
    pub file_type: String,
    pub file_size: i64,
    pub public_url: Option<String>,
    pub team_id: Option<i64>,
    pub idea_id: Option<i64>,
}

impl From<file::Model> for FileData {
    fn from(model: file::Model) -> Self {
        FileData {
            id: model.id,
            original_filename: model.original_filename,
            file_type: model.file_type,
            file_size: model.file_size,
            public_url: model.public_url,
            team_id: model.team_id,
            idea_id: model.idea_id,
        }
    }
}
