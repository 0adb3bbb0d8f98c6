use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use axum_derive_error::ErrorResponse;
use db::{
    senior_mentor_request, team, ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr,
    EntityTrait, TransactionErrorExt, TransactionTrait,
};
use derive_more::{Display, Error, From};
use serde::Deserialize;
use validator::Validate;

use super::RequestData;
use crate::validation::ValidatedJson;

/// Errors that may occur while responding to a senior mentorship request.
#[derive(ErrorResponse, Display, From, Error)]
pub(super) enum RespondError {
    /// Database-related error.
    DatabaseError(DbErr),

    #[status(StatusCode::BAD_REQUEST)]
    #[display(fmt = "Invalid status")]
    InvalidStatus,

    #[status(StatusCode::NOT_FOUND)]
    #[display(fmt = "Request not found")]
    RequestNotFound,

    #[status(StatusCode::BAD_REQUEST)]
    #[display(fmt = "Request has already been responded to")]
    AlreadyResponded,

    #[status(StatusCode::NOT_FOUND)]
    #[display(fmt = "Team not found")]
    TeamNotFound,

    #[status(StatusCode::BAD_REQUEST)]
    #[display(fmt = "Team already has a senior mentor")]
    TeamHasMentor,
}

#[derive(Deserialize, Validate)]
pub(super) struct RespondRequest {
    status: senior_mentor_request::RequestStatus,
}

/// Senior mentorship request response handler.
///
/// Unlike professors, mentors have no team ceiling, so acceptance
/// only links the mentor to the requesting team.
pub(super) async fn respond(
    State(db): State<Arc<DatabaseConnection>>,
    Path(request_id): Path<i64>,
    ValidatedJson(request): ValidatedJson<RespondRequest>,
) -> Result<Json<RequestData>, RespondError> {
    if request.status == senior_mentor_request::RequestStatus::Pending {
        return Err(RespondError::InvalidStatus);
    }

    let model = db
        .transaction(|txn| {
            Box::pin(async move {
                let model = senior_mentor_request::Entity::find_by_id(request_id)
                    .one(txn)
                    .await?
                    .ok_or(RespondError::RequestNotFound)?;

                if model.status != senior_mentor_request::RequestStatus::Pending {
                    return Err(RespondError::AlreadyResponded);
                }

                if request.status == senior_mentor_request::RequestStatus::Accepted {
                    // Another mentor may have accepted a parallel request
                    // since this one was sent.
                    let requesting_team = team::Entity::find_by_id(model.team_id)
                        .one(txn)
                        .await?
                        .ok_or(RespondError::TeamNotFound)?;

                    if requesting_team.senior_mentor_id.is_some() {
                        return Err(RespondError::TeamHasMentor);
                    }

                    team::ActiveModel {
                        id: ActiveValue::Unchanged(requesting_team.id),
                        senior_mentor_id: ActiveValue::Set(Some(model.mentor_id)),
                        ..Default::default()
                    }
                    .update(txn)
                    .await?;
                }

                let mut active: senior_mentor_request::ActiveModel = model.into();
                active.status = ActiveValue::Set(request.status);

                Ok(active.update(txn).await?)
            })
        })
        .await
        .into_raw_result()?;

    Ok(Json(model.into()))
}
