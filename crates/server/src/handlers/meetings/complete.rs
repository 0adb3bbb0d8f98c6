use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use axum_derive_error::ErrorResponse;
use db::{
    leaderboard, meeting, student, ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection,
    DbErr, EntityTrait, QueryFilter, TransactionErrorExt, TransactionTrait,
};
use derive_more::{Display, Error, From};
use serde::Deserialize;
use validator::Validate;

use super::MeetingData;
use crate::{auth::AuthenticatedStudentId, validation::ValidatedJson};

/// Errors that may occur while completing a meeting.
#[derive(ErrorResponse, Display, From, Error)]
pub(super) enum CompleteMeetingError {
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

    #[status(StatusCode::BAD_REQUEST)]
    #[display(fmt = "Meeting is already marked as completed")]
    AlreadyCompleted,

    #[status(StatusCode::BAD_REQUEST)]
    #[display(fmt = "Meeting has been canceled")]
    Canceled,

    #[status(StatusCode::NOT_FOUND)]
    #[display(fmt = "Leaderboard entry not found for this team")]
    LeaderboardNotFound,
}

#[derive(Deserialize, Validate)]
pub(super) struct CompleteMeetingRequest {
    feedback: Option<String>,
}

/// Meeting completion handler.
///
/// Completing a meeting advances the team's score. The mentor
/// feedback counter only moves when the completion actually
/// carries non-empty feedback.
pub(super) async fn complete(
    State(db): State<Arc<DatabaseConnection>>,
    Extension(student_id): Extension<AuthenticatedStudentId>,
    Path(meeting_id): Path<i64>,
    ValidatedJson(request): ValidatedJson<CompleteMeetingRequest>,
) -> Result<Json<MeetingData>, CompleteMeetingError> {
    let model = db
        .transaction(|txn| {
            Box::pin(async move {
                let model = meeting::Entity::find_by_id(meeting_id)
                    .one(txn)
                    .await?
                    .ok_or(CompleteMeetingError::MeetingNotFound)?;

                let student = student::Entity::find_by_id(student_id.id())
                    .one(txn)
                    .await?
                    .ok_or(CompleteMeetingError::StudentNotFound)?;

                if student.team_id != Some(model.team_id) {
                    return Err(CompleteMeetingError::AccessDenied);
                }

                match model.status {
                    meeting::Status::Scheduled => {}
                    meeting::Status::Completed => {
                        return Err(CompleteMeetingError::AlreadyCompleted)
                    }
                    meeting::Status::Canceled => return Err(CompleteMeetingError::Canceled),
                }

                let feedback = request
                    .feedback
                    .filter(|feedback| !feedback.trim().is_empty());

                let entry = leaderboard::Entity::find()
                    .filter(leaderboard::Column::TeamId.eq(model.team_id))
                    .one(txn)
                    .await?
                    .ok_or(CompleteMeetingError::LeaderboardNotFound)?;

                let meetings_done = entry.meetings_done + 1;
                let mentor_feedback_count = if feedback.is_some() {
                    entry.mentor_feedback_count + 1
                } else {
                    entry.mentor_feedback_count
                };
                let tasks_done = entry.tasks_done;

                let mut active: leaderboard::ActiveModel = entry.into();
                active.meetings_done = ActiveValue::Set(meetings_done);
                active.mentor_feedback_count = ActiveValue::Set(mentor_feedback_count);
                active.total_score = ActiveValue::Set(leaderboard::total_score(
                    meetings_done,
                    tasks_done,
                    mentor_feedback_count,
                ));
                active.updated_at = ActiveValue::Set(db::now());
                active.update(txn).await?;

                let mut active: meeting::ActiveModel = model.into();
                active.status = ActiveValue::Set(meeting::Status::Completed);
                active.feedback = ActiveValue::Set(feedback);

                Ok(active.update(txn).await?)
            })
        })
        .await
        .into_raw_result()?;

    Ok(Json(model.into()))
}
