use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{multipart::MultipartError, Multipart, Path, State},
    http::StatusCode,
    Extension, Json,
};
use axum_derive_error::ErrorResponse;
use common::{config::Config, s3::ConfiguredClient};
use db::{
    file, idea, student, ActiveValue, DatabaseConnection, DbErr, EntityTrait,
};
use derive_more::{Display, Error, From};

use super::{FileData, ALLOWED_EXTENSIONS};
use crate::auth::AuthenticatedStudentId;

/// Errors that may occur during the file upload process.
#[derive(ErrorResponse, Display, From, Error)]
pub(super) enum UploadFileError {
    /// Database-related error.
    DatabaseError(DbErr),

    /// Object storage error.
    StorageError(common::s3::Error),

    #[status(StatusCode::BAD_REQUEST)]
    MultipartError(MultipartError),

    #[status(StatusCode::BAD_REQUEST)]
    #[display(fmt = "no file upload was found")]
    NoFileUpload,

    #[status(StatusCode::BAD_REQUEST)]
    #[display(
        fmt = "File type not allowed. Allowed types: pdf, png, jpg, jpeg, doc, docx, ppt, pptx, xls, xlsx, txt, zip"
    )]
    DisallowedFileType,

    #[status(StatusCode::BAD_REQUEST)]
    #[display(fmt = "File size exceeds the 10MB limit")]
    FileTooLarge,

    #[status(StatusCode::NOT_FOUND)]
    #[display(fmt = "Student not found")]
    StudentNotFound,

    #[status(StatusCode::BAD_REQUEST)]
    #[display(fmt = "You are not in a team")]
    NotInTeam,

    #[status(StatusCode::NOT_FOUND)]
    #[display(fmt = "Idea not found")]
    IdeaNotFound,

    #[status(StatusCode::FORBIDDEN)]
    #[display(fmt = "Access denied: You are not in this team")]
    AccessDenied,
}

/// A single validated file extracted from a multipart request.
struct Upload {
    original_filename: String,
    extension: String,
    content_type: String,
    data: Bytes,
}

/// Pull the first file out of a multipart request, enforcing the
/// extension allow-list and the configured size ceiling.
async fn read_upload(config: &Config, data: &mut Multipart) -> Result<Upload, UploadFileError> {
    let field = data
        .next_field()
        .await?
        .ok_or(UploadFileError::NoFileUpload)?;

    let original_filename = field
        .file_name()
        .ok_or(UploadFileError::NoFileUpload)?
        .to_string();

    let extension = original_filename
        .rsplit_once('.')
        .map(|(_, extension)| extension.to_ascii_lowercase())
        .filter(|extension| ALLOWED_EXTENSIONS.contains(&extension.as_str()))
        .ok_or(UploadFileError::DisallowedFileType)?;

    let content_type = field
        .content_type()
        .unwrap_or("application/octet-stream")
        .to_string();

    let data = field.bytes().await?;

    if data.len() > config.storage.file_size_limit {
        return Err(UploadFileError::FileTooLarge);
    }

    Ok(Upload {
        original_filename,
        extension,
        content_type,
        data,
    })
}

/// Store the upload in object storage and record its metadata row.
async fn store_upload(
    db: &DatabaseConnection,
    config: &Config,
    upload: Upload,
    prefix: &str,
    team_id: Option<i64>,
    idea_id: Option<i64>,
) -> Result<file::Model, UploadFileError> {
    let key = file::generate_storage_key(prefix, &upload.extension);

    let client = ConfiguredClient::new(&config.storage).await;

    client
        .upload_file(&key, &upload.content_type, upload.data.to_vec())
        .await?;

    let public_url = client.get_file(&key).await?.uri().to_string();

    let model = file::Entity::insert(file::ActiveModel {
        storage_key: ActiveValue::Set(key.clone()),
        original_filename: ActiveValue::Set(upload.original_filename),
        file_type: ActiveValue::Set(upload.extension),
        file_size: ActiveValue::Set(upload.data.len() as i64),
        storage_path: ActiveValue::Set(format!("{}/{key}", config.storage.file_bucket)),
        public_url: ActiveValue::Set(Some(public_url)),
        team_id: ActiveValue::Set(team_id),
        idea_id: ActiveValue::Set(idea_id),
        created_at: ActiveValue::Set(db::now()),
        ..Default::default()
    })
    .exec_with_returning(db)
    .await?;

    Ok(model)
}

/// Team file upload handler.
pub(super) async fn team(
    State(db): State<Arc<DatabaseConnection>>,
    Extension(config): Extension<Arc<Config>>,
    Extension(student_id): Extension<AuthenticatedStudentId>,
    mut data: Multipart,
) -> Result<(StatusCode, Json<FileData>), UploadFileError> {
    let student = student::Entity::find_by_id(student_id.id())
        .one(&*db)
        .await?
        .ok_or(UploadFileError::StudentNotFound)?;

    let team_id = student.team_id.ok_or(UploadFileError::NotInTeam)?;

    let upload = read_upload(&config, &mut data).await?;

    let model = store_upload(
        &db,
        &config,
        upload,
        &format!("team_{team_id}"),
        Some(team_id),
        None,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(model.into())))
}

/// Idea file upload handler.
///
/// Only members of the team that owns the idea may attach files to it.
pub(super) async fn idea(
    State(db): State<Arc<DatabaseConnection>>,
    Extension(config): Extension<Arc<Config>>,
    Extension(student_id): Extension<AuthenticatedStudentId>,
    Path(idea_id): Path<i64>,
    mut data: Multipart,
) -> Result<(StatusCode, Json<FileData>), UploadFileError> {
    let student = student::Entity::find_by_id(student_id.id())
        .one(&*db)
        .await?
        .ok_or(UploadFileError::StudentNotFound)?;

    let idea = idea::Entity::find_by_id(idea_id)
        .one(&*db)
        .await?
        .ok_or(UploadFileError::IdeaNotFound)?;

    if student.team_id != Some(idea.team_id) {
        return Err(UploadFileError::AccessDenied);
    }

    let upload = read_upload(&config, &mut data).await?;

    let model = store_upload(
        &db,
        &config,
        upload,
        &format!("idea_{idea_id}"),
        None,
        Some(idea_id),
    )
    .await?;

    Ok((StatusCode::CREATED, Json(model.into())))
}
