use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use axum_derive_error::ErrorResponse;
use common::{config::Config, s3::ConfiguredClient};
use db::{
    file, idea, student, ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr, EntityTrait,
};
use derive_more::{Display, Error, From};

use super::FileData;
use crate::auth::AuthenticatedStudentId;

/// Errors that may occur during the file details request handling.
#[derive(ErrorResponse, Display, From, Error)]
pub(super) enum DetailsError {
    /// Database-related error.
    DatabaseError(DbErr),

    /// Object storage error.
    StorageError(common::s3::Error),

    #[status(StatusCode::NOT_FOUND)]
    #[display(fmt = "File not found")]
    FileNotFound,

    #[status(StatusCode::NOT_FOUND)]
    #[display(fmt = "Student not found")]
    StudentNotFound,

    #[status(StatusCode::FORBIDDEN)]
    #[display(fmt = "Access denied: You are not in this team")]
    AccessDenied,
}

/// File details handler.
///
/// Pre-signed URLs expire, so a missing `public_url` is regenerated
/// on read and persisted for subsequent requests.
pub(super) async fn details(
    State(db): State<Arc<DatabaseConnection>>,
    Extension(config): Extension<Arc<Config>>,
    Extension(student_id): Extension<AuthenticatedStudentId>,
    Path(file_id): Path<i64>,
) -> Result<Json<FileData>, DetailsError> {
    let student = student::Entity::find_by_id(student_id.id())
        .one(&*db)
        .await?
        .ok_or(DetailsError::StudentNotFound)?;

    let mut file = file::Entity::find_by_id(file_id)
        .one(&*db)
        .await?
        .ok_or(DetailsError::FileNotFound)?;

    let owning_team_id = match (file.team_id, file.idea_id) {
        (Some(team_id), _) => team_id,
        (None, Some(idea_id)) => {
            idea::Entity::find_by_id(idea_id)
                .one(&*db)
                .await?
                .ok_or(DetailsError::FileNotFound)?
                .team_id
        }
        (None, None) => return Err(DetailsError::FileNotFound),
    };

    if student.team_id != Some(owning_team_id) {
        return Err(DetailsError::AccessDenied);
    }

    if file.public_url.is_none() {
        let public_url = ConfiguredClient::new(&config.storage)
            .await
            .get_file(&file.storage_key)
            .await?
            .uri()
            .to_string();

        file = file::ActiveModel {
            id: ActiveValue::Unchanged(file.id),
            public_url: ActiveValue::Set(Some(public_url)),
            ..Default::default()
        }
        .update(&*db)
        .await?;
    }

    Ok(Json(file.into()))
}
