use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use axum_derive_error::ErrorResponse;
use db::{
    meeting, student, team, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder,
};
use derive_more::{Display, Error, From};

use super::MeetingData;
use crate::auth::AuthenticatedStudentId;

/// Errors that may occur while listing team meetings.
#[derive(ErrorResponse, Display, From, Error)]
pub(super) enum TeamMeetingsError {
    /// Database-related error.
    DatabaseError(DbErr),

    #[status(StatusCode::NOT_FOUND)]
    #[display(fmt = "Team not found")]
    TeamNotFound,

    #[status(StatusCode::NOT_FOUND)]
    #[display(fmt = "Student not found")]
    StudentNotFound,

    #[status(StatusCode::FORBIDDEN)]
    #[display(fmt = "Access denied: You are not in this team")]
    AccessDenied,
}

/// Team meeting listing handler.
///
/// Meetings are returned in scheduled order, earliest first.
pub(super) async fn team_meetings(
    State(db): State<Arc<DatabaseConnection>>,
    Extension(student_id): Extension<AuthenticatedStudentId>,
    Path(team_id): Path<i64>,
) -> Result<Json<Vec<MeetingData>>, TeamMeetingsError> {
    let team = team::Entity::find_by_id(team_id)
        .one(&*db)
        .await?
        .ok_or(TeamMeetingsError::TeamNotFound)?;

    let student = student::Entity::find_by_id(student_id.id())
        .one(&*db)
        .await?
        .ok_or(TeamMeetingsError::StudentNotFound)?;

    if student.team_id != Some(team.id) {
        return Err(TeamMeetingsError::AccessDenied);
    }

    let meetings = meeting::Entity::find()
        .filter(meeting::Column::TeamId.eq(team.id))
        .order_by_asc(meeting::Column::ScheduledAt)
        .all(&*db)
        .await?;

    Ok(Json(meetings.into_iter().map(Into::into).collect()))
}
