use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Extension, Json};
use axum_derive_error::ErrorResponse;
use db::{student, team, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter};
use derive_more::{Display, Error, From};

use super::TeamDetailsData;
use crate::auth::AuthenticatedStudentId;

/// Errors that may occur while fetching the caller's team.
#[derive(ErrorResponse, Display, From, Error)]
pub(super) enum MyTeamError {
    /// Database-related error.
    DatabaseError(DbErr),

    #[status(StatusCode::NOT_FOUND)]
    #[display(fmt = "Student not found")]
    StudentNotFound,

    #[status(StatusCode::BAD_REQUEST)]
    #[display(fmt = "You are not in a team")]
    NotInTeam,

    #[status(StatusCode::NOT_FOUND)]
    #[display(fmt = "Team not found")]
    TeamNotFound,
}

/// Current team handler.
pub(super) async fn my_team(
    State(db): State<Arc<DatabaseConnection>>,
    Extension(student_id): Extension<AuthenticatedStudentId>,
) -> Result<Json<TeamDetailsData>, MyTeamError> {
    let student = student::Entity::find_by_id(student_id.id())
        .one(&*db)
        .await?
        .ok_or(MyTeamError::StudentNotFound)?;

    let team_id = student.team_id.ok_or(MyTeamError::NotInTeam)?;

    let team = team::Entity::find_by_id(team_id)
        .one(&*db)
        .await?
        .ok_or(MyTeamError::TeamNotFound)?;

    let members = student::Entity::find()
        .filter(student::Column::TeamId.eq(team.id))
        .all(&*db)
        .await?;

    Ok(Json(TeamDetailsData::new(team, members)))
}
