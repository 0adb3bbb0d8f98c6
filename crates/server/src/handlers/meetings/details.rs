use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use axum_derive_error::ErrorResponse;
use db::{meeting, student, DatabaseConnection, DbErr, EntityTrait};
use derive_more::{Display, Error, From};

use super::MeetingData;
use crate::auth::AuthenticatedStudentId;

/// Errors that may occur while fetching meeting details.
#[derive(ErrorResponse, Display, From, Error)]
pub(super) enum MeetingDetailsError {
    /// Database-related error.
    DatabaseError(DbErr),

    #[status(StatusCode::NOT_FOUND)]
    #[display(fmt = "Meeting not found")]
    MeetingNotFound,

    #[status(StatusCode::NOT_FOUND)]
    #[display(fmt = "Student not found")]
    StudentNotFound,

    #[status(StatusCode::FORBIDDEN)]
    #[display(fmt = "Access denied: You are not in this team")]
    AccessDenied,
}

/// Meeting details handler.
///
/// Only members of the owning team may inspect a meeting.
pub(super) async fn details(
    State(db): State<Arc<DatabaseConnection>>,
    Extension(student_id): Extension<AuthenticatedStudentId>,
    Path(meeting_id): Path<i64>,
) -> Result<Json<MeetingData>, MeetingDetailsError> {
    let model = meeting::Entity::find_by_id(meeting_id)
        .one(&*db)
        .await?
        .ok_or(MeetingDetailsError::MeetingNotFound)?;

    let student = student::Entity::find_by_id(student_id.id())
        .one(&*db)
        .await?
        .ok_or(MeetingDetailsError::StudentNotFound)?;

    if student.team_id != Some(model.team_id) {
        return Err(MeetingDetailsError::AccessDenied);
    }

    Ok(Json(model.into()))
}
