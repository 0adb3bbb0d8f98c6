use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Extension, Json};
use axum_derive_error::ErrorResponse;
use db::{
    leaderboard, student, team, ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection,
    DbErr, EntityTrait, QueryFilter, QuerySelect, SelectExt, TransactionErrorExt, TransactionTrait,
};
use derive_more::{Display, Error, From};
use serde::Deserialize;
use validator::Validate;

use super::TeamData;
use crate::{auth::AuthenticatedStudentId, validation::ValidatedJson};

/// Errors that may occur during the team creation process.
#[derive(ErrorResponse, Display, From, Error)]
pub(super) enum CreateTeamError {
    /// Database-related error.
    DatabaseError(DbErr),

    #[status(StatusCode::NOT_FOUND)]
    #[display(fmt = "Student not found")]
    StudentNotFound,

    #[status(StatusCode::BAD_REQUEST)]
    #[display(fmt = "You are already in a team")]
    AlreadyInTeam,

    #[status(StatusCode::BAD_REQUEST)]
    #[display(fmt = "You are already leading a team")]
    AlreadyLeadingTeam,

    #[status(StatusCode::BAD_REQUEST)]
    #[display(fmt = "Team name already taken")]
    NameTaken,
}

#[derive(Deserialize, Validate)]
pub(super) struct CreateTeamRequest {
    #[validate(length(min = 3, max = 50))]
    name: String,
}

/// Team creation handler.
///
/// The caller becomes both the leader and the first member, and
/// the leaderboard entry is created in the same transaction so
/// that a team is never missing its score row.
pub(super) async fn create(
    State(db): State<Arc<DatabaseConnection>>,
    Extension(student_id): Extension<AuthenticatedStudentId>,
    ValidatedJson(request): ValidatedJson<CreateTeamRequest>,
) -> Result<(StatusCode, Json<TeamData>), CreateTeamError> {
    let team = db
        .transaction(|txn| {
            Box::pin(async move {
                let student = student::Entity::find_by_id(student_id.id())
                    .one(txn)
                    .await?
                    .ok_or(CreateTeamError::StudentNotFound)?;

                if student.team_id.is_some() {
                    return Err(CreateTeamError::AlreadyInTeam);
                }

                let leads_team = team::Entity::find()
                    .select_only()
                    .filter(team::Column::LeaderId.eq(student.id))
                    .exists(txn)
                    .await?;

                if leads_team {
                    return Err(CreateTeamError::AlreadyLeadingTeam);
                }

                let name_taken = team::Entity::find()
                    .select_only()
                    .filter(team::Column::Name.eq(&*request.name))
                    .exists(txn)
                    .await?;

                if name_taken {
                    return Err(CreateTeamError::NameTaken);
                }

                let team = team::Entity::insert(team::ActiveModel {
                    name: ActiveValue::Set(request.name),
                    is_locked: ActiveValue::Set(false),
                    leader_id: ActiveValue::Set(student.id),
                    created_at: ActiveValue::Set(db::now()),
                    ..Default::default()
                })
                .exec_with_returning(txn)
                .await?;

                leaderboard::Entity::insert(leaderboard::ActiveModel {
                    team_id: ActiveValue::Set(team.id),
                    meetings_done: ActiveValue::Set(0),
                    tasks_done: ActiveValue::Set(0),
                    mentor_feedback_count: ActiveValue::Set(0),
                    total_score: ActiveValue::Set(0),
                    updated_at: ActiveValue::Set(db::now()),
                    ..Default::default()
                })
                .exec_without_returning(txn)
                .await?;

                let mut active: student::ActiveModel = student.into();
                active.team_id = ActiveValue::Set(Some(team.id));
                active.update(txn).await?;

                Ok(team)
            })
        })
        .await
        .into_raw_result()?;

    Ok((StatusCode::CREATED, Json(TeamData::new(team, 1))))
}
