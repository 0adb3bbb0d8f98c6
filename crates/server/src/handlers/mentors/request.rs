use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Extension, Json};
use axum_derive_error::ErrorResponse;
use db::{
    mentor, senior_mentor_request, student, team, ActiveValue, ColumnTrait, DatabaseConnection,
    DbErr, EntityTrait, QueryFilter, QuerySelect, SelectExt, TransactionErrorExt, TransactionTrait,
};
use derive_more::{Display, Error, From};
use serde::Deserialize;
use validator::Validate;

use super::RequestData;
use crate::{auth::AuthenticatedStudentId, validation::ValidatedJson};

/// Errors that may occur while requesting senior mentorship.
#[derive(ErrorResponse, Display, From, Error)]
pub(super) enum MentorshipRequestError {
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

    #[status(StatusCode::FORBIDDEN)]
    #[display(fmt = "Only team leader can request mentors")]
    NotTeamLeader,

    #[status(StatusCode::BAD_REQUEST)]
    #[display(fmt = "Team already has a senior mentor")]
    TeamHasMentor,

    #[status(StatusCode::NOT_FOUND)]
    #[display(fmt = "Mentor not found")]
    MentorNotFound,

    #[status(StatusCode::BAD_REQUEST)]
    #[display(fmt = "Request already sent to this mentor")]
    DuplicateRequest,
}

#[derive(Deserialize, Validate)]
pub(super) struct MentorshipRequest {
    mentor_id: i64,

    #[validate(length(max = 500))]
    message: Option<String>,
}

/// Senior mentorship request creation handler.
pub(super) async fn request(
    State(db): State<Arc<DatabaseConnection>>,
    Extension(student_id): Extension<AuthenticatedStudentId>,
    ValidatedJson(request): ValidatedJson<MentorshipRequest>,
) -> Result<(StatusCode, Json<RequestData>), MentorshipRequestError> {
    let model = db
        .transaction(|txn| {
            Box::pin(async move {
                let student = student::Entity::find_by_id(student_id.id())
                    .one(txn)
                    .await?
                    .ok_or(MentorshipRequestError::StudentNotFound)?;

                let team_id = student.team_id.ok_or(MentorshipRequestError::NotInTeam)?;

                let team = team::Entity::find_by_id(team_id)
                    .one(txn)
                    .await?
                    .ok_or(MentorshipRequestError::TeamNotFound)?;

                if team.leader_id != student.id {
                    return Err(MentorshipRequestError::NotTeamLeader);
                }

                if team.senior_mentor_id.is_some() {
                    return Err(MentorshipRequestError::TeamHasMentor);
                }

                let mentor = mentor::Entity::find_by_id(request.mentor_id)
                    .one(txn)
                    .await?
                    .ok_or(MentorshipRequestError::MentorNotFound)?;

                let duplicate = senior_mentor_request::Entity::find()
                    .select_only()
                    .filter(senior_mentor_request::Column::TeamId.eq(team.id))
                    .filter(senior_mentor_request::Column::MentorId.eq(mentor.id))
                    .exists(txn)
                    .await?;

                if duplicate {
                    return Err(MentorshipRequestError::DuplicateRequest);
                }

                let model =
                    senior_mentor_request::Entity::insert(senior_mentor_request::ActiveModel {
                        team_id: ActiveValue::Set(team.id),
                        mentor_id: ActiveValue::Set(mentor.id),
                        status: ActiveValue::Set(senior_mentor_request::RequestStatus::Pending),
                        message: ActiveValue::Set(request.message),
                        created_at: ActiveValue::Set(db::now()),
                        ..Default::default()
                    })
                    .exec_with_returning(txn)
                    .await?;

                Ok(model)
            })
        })
        .await
        .into_raw_result()?;

    Ok((StatusCode::CREATED, Json(model.into())))
}
