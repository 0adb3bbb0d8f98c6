use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Extension, Json};
use axum_derive_error::ErrorResponse;
use db::{
    meeting, student, team, ActiveValue, DatabaseConnection, DbErr, EntityTrait, OffsetDateTime,
    PrimitiveDateTime, TransactionErrorExt, TransactionTrait,
};
use derive_more::{Display, Error, From};
use serde::Deserialize;
use time::{format_description::well_known::Rfc3339, UtcOffset};
use validator::Validate;

use super::MeetingData;
use crate::{auth::AuthenticatedStudentId, validation::ValidatedJson};

/// Errors that may occur while scheduling a meeting.
#[derive(ErrorResponse, Display, From, Error)]
pub(super) enum CreateMeetingError {
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
    #[display(fmt = "Only team leader can schedule meetings")]
    NotTeamLeader,

    #[status(StatusCode::BAD_REQUEST)]
    #[display(fmt = "Invalid date format, expected an ISO-8601 timestamp")]
    InvalidDate,

    #[status(StatusCode::BAD_REQUEST)]
    #[display(fmt = "Meeting must be scheduled in the future")]
    DateNotInFuture,
}

#[derive(Deserialize, Validate)]
pub(super) struct CreateMeetingRequest {
    #[validate(length(min = 3))]
    title: String,

    description: Option<String>,

    scheduled_at: String,
}

/// Meeting scheduling handler.
///
/// The meeting inherits the team's current professor and senior
/// mentor assignments at scheduling time.
pub(super) async fn create(
    State(db): State<Arc<DatabaseConnection>>,
    Extension(student_id): Extension<AuthenticatedStudentId>,
    ValidatedJson(request): ValidatedJson<CreateMeetingRequest>,
) -> Result<(StatusCode, Json<MeetingData>), CreateMeetingError> {
    let scheduled_at = OffsetDateTime::parse(&request.scheduled_at, &Rfc3339)
        .map_err(|_| CreateMeetingError::InvalidDate)?;

    if scheduled_at <= OffsetDateTime::now_utc() {
        return Err(CreateMeetingError::DateNotInFuture);
    }

    let scheduled_at = {
        let utc = scheduled_at.to_offset(UtcOffset::UTC);

        PrimitiveDateTime::new(utc.date(), utc.time())
    };

    let model = db
        .transaction(|txn| {
            Box::pin(async move {
                let student = student::Entity::find_by_id(student_id.id())
                    .one(txn)
                    .await?
                    .ok_or(CreateMeetingError::StudentNotFound)?;

                let team_id = student.team_id.ok_or(CreateMeetingError::NotInTeam)?;

                let team = team::Entity::find_by_id(team_id)
                    .one(txn)
                    .await?
                    .ok_or(CreateMeetingError::TeamNotFound)?;

                if team.leader_id != student.id {
                    return Err(CreateMeetingError::NotTeamLeader);
                }

                let model = meeting::Entity::insert(meeting::ActiveModel {
                    title: ActiveValue::Set(request.title),
                    description: ActiveValue::Set(request.description),
                    scheduled_at: ActiveValue::Set(scheduled_at),
                    status: ActiveValue::Set(meeting::Status::Scheduled),
                    feedback: ActiveValue::Set(None),
                    team_id: ActiveValue::Set(team.id),
                    professor_id: ActiveValue::Set(team.professor_id),
                    mentor_id: ActiveValue::Set(team.senior_mentor_id),
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
