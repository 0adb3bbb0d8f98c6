use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use axum_derive_error::ErrorResponse;
use db::{
    student, team, ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QuerySelect, TransactionErrorExt, TransactionTrait,
};
use derive_more::{Display, Error, From};

use super::TeamData;
use crate::auth::AuthenticatedStudentId;

/// Errors that may occur while joining a team.
#[derive(ErrorResponse, Display, From, Error)]
pub(super) enum JoinTeamError {
    /// Database-related error.
    DatabaseError(DbErr),

    #[status(StatusCode::NOT_FOUND)]
    #[display(fmt = "Team not found")]
    TeamNotFound,

    #[status(StatusCode::NOT_FOUND)]
    #[display(fmt = "Student not found")]
    StudentNotFound,

    #[status(StatusCode::BAD_REQUEST)]
    #[display(fmt = "You are already in a team")]
    AlreadyInTeam,

    #[status(StatusCode::BAD_REQUEST)]
    #[display(fmt = "Team is locked and not accepting new members")]
    TeamLocked,

    #[status(StatusCode::BAD_REQUEST)]
    #[display(fmt = "Team is already full")]
    TeamFull,
}

/// Team joining handler.
///
/// The team row is locked for the duration of the transaction so
/// that two concurrent joins cannot both observe a free slot. The
/// fourth member locks the team automatically.
pub(super) async fn join(
    State(db): State<Arc<DatabaseConnection>>,
    Extension(student_id): Extension<AuthenticatedStudentId>,
    Path(team_id): Path<i64>,
) -> Result<Json<TeamData>, JoinTeamError> {
    let (team, member_count) = db
        .transaction(|txn| {
            Box::pin(async move {
                let team = team::Entity::find_by_id(team_id)
                    .lock_exclusive()
                    .one(txn)
                    .await?
                    .ok_or(JoinTeamError::TeamNotFound)?;

                let student = student::Entity::find_by_id(student_id.id())
                    .one(txn)
                    .await?
                    .ok_or(JoinTeamError::StudentNotFound)?;

                if student.team_id.is_some() {
                    return Err(JoinTeamError::AlreadyInTeam);
                }

                if team.is_locked {
                    return Err(JoinTeamError::TeamLocked);
                }

                let member_count = student::Entity::find()
                    .filter(student::Column::TeamId.eq(team.id))
                    .count(txn)
                    .await?;

                if member_count >= team::MAX_MEMBERS {
                    return Err(JoinTeamError::TeamFull);
                }

                let mut active: student::ActiveModel = student.into();
                active.team_id = ActiveValue::Set(Some(team.id));
                active.update(txn).await?;

                let member_count = member_count + 1;

                let team = if member_count >= team::MAX_MEMBERS {
                    let mut active: team::ActiveModel = team.into();
                    active.is_locked = ActiveValue::Set(true);
                    active.update(txn).await?
                } else {
                    team
                };

                Ok((team, member_count))
            })
        })
        .await
        .into_raw_result()?;

    Ok(Json(TeamData::new(team, member_count)))
}
