use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension,
};
use axum_derive_error::ErrorResponse;
use common::{config::Config, email::Mailer};
use db::{student, team, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter};
use derive_more::{Display, Error, From};
use serde::Deserialize;
use tracing::warn;
use validator::Validate;

use crate::{auth::AuthenticatedStudentId, validation::ValidatedJson};

/// Errors that may occur while inviting a student to a team.
#[derive(ErrorResponse, Display, From, Error)]
pub(super) enum InviteError {
    /// Database-related error.
    DatabaseError(DbErr),

    #[status(StatusCode::NOT_FOUND)]
    #[display(fmt = "Team not found")]
    TeamNotFound,

    #[status(StatusCode::FORBIDDEN)]
    #[display(fmt = "Only team leader can send invites")]
    NotTeamLeader,

    #[status(StatusCode::NOT_FOUND)]
    #[display(fmt = "Student not found with this email")]
    StudentNotFound,

    #[status(StatusCode::BAD_REQUEST)]
    #[display(fmt = "Student is already in a team")]
    StudentAlreadyInTeam,
}

#[derive(Deserialize, Validate)]
pub(super) struct InviteRequest {
    #[validate(email)]
    email: String,
}

/// Team invitation handler.
///
/// The invitation email is best-effort: a relay failure is logged
/// and the request still succeeds, since the invited student can
/// always join the team directly.
pub(super) async fn invite(
    State(db): State<Arc<DatabaseConnection>>,
    Extension(config): Extension<Arc<Config>>,
    Extension(student_id): Extension<AuthenticatedStudentId>,
    Path(team_id): Path<i64>,
    ValidatedJson(request): ValidatedJson<InviteRequest>,
) -> Result<(), InviteError> {
    let team = team::Entity::find_by_id(team_id)
        .one(&*db)
        .await?
        .ok_or(InviteError::TeamNotFound)?;

    if team.leader_id != student_id.id() {
        return Err(InviteError::NotTeamLeader);
    }

    let target = student::Entity::find()
        .filter(student::Column::Email.eq(&*request.email))
        .one(&*db)
        .await?
        .ok_or(InviteError::StudentNotFound)?;

    if target.team_id.is_some() {
        return Err(InviteError::StudentAlreadyInTeam);
    }

    if let Some(smtp) = config.smtp.as_ref() {
        let outcome = match Mailer::new(smtp) {
            Ok(mailer) => {
                mailer
                    .send(
                        &target.email,
                        "Hackathon team invitation",
                        format!("You have been invited to join team {}.", team.name),
                    )
                    .await
            }
            Err(err) => Err(err),
        };

        if let Err(err) = outcome {
            warn!("unable to send an invitation email: {err}");
        }
    }

    Ok(())
}
