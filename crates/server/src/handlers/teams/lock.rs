use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension,
};
use axum_derive_error::ErrorResponse;
use db::{team, ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr, EntityTrait};
use derive_more::{Display, Error, From};

use crate::auth::AuthenticatedStudentId;

/// Errors that may occur while locking a team.
#[derive(ErrorResponse, Display, From, Error)]
pub(super) enum LockTeamError {
    /// Database-related error.
    DatabaseError(DbErr),

    #[status(StatusCode::NOT_FOUND)]
    #[display(fmt = "Team not found")]
    TeamNotFound,

    #[status(StatusCode::FORBIDDEN)]
    #[display(fmt = "Only team leader can lock the team")]
    NotTeamLeader,
}

/// Manual team locking handler.
///
/// Locking is idempotent, so re-locking an already locked team
/// is accepted.
pub(super) async fn lock(
    State(db): State<Arc<DatabaseConnection>>,
    Extension(student_id): Extension<AuthenticatedStudentId>,
    Path(team_id): Path<i64>,
) -> Result<(), LockTeamError> {
    let team = team::Entity::find_by_id(team_id)
        .one(&*db)
        .await?
        .ok_or(LockTeamError::TeamNotFound)?;

    if team.leader_id != student_id.id() {
        return Err(LockTeamError::NotTeamLeader);
    }

    let mut active: team::ActiveModel = team.into();
    active.is_locked = ActiveValue::Set(true);
    active.update(&*db).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::testing::{bearer, create_database, create_student, create_team, ResponseBodyExt};

    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use common::config::Config;
    use tower::{Service, ServiceExt};

    fn lock_request(student_id: i64, team_id: i64) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(format!("/teams/{team_id}/lock"))
            .header("Authorization", bearer(student_id))
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn lock_prevents_joining() {
        let db = create_database().await;

        let leader = create_student(&db, "Leader", "CS2021001", "leader@example.com").await;
        let team = create_team(&db, "Rustaceans", leader.id).await;

        let member = create_student(&db, "Member", "CS2021002", "member@example.com").await;

        let mut service = crate::app_router(Arc::new(db), Arc::new(Config::for_tests()));

        let response = service.call(lock_request(leader.id, team.id)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let response = service
            .call(
                Request::builder()
                    .method("POST")
                    .uri(format!("/teams/{}/join", team.id))
                    .header("Authorization", bearer(member.id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.error().await,
            "Team is locked and not accepting new members"
        );
    }

    #[tokio::test]
    async fn not_a_leader() {
        let db = create_database().await;

        let leader = create_student(&db, "Leader", "CS2021001", "leader@example.com").await;
        let team = create_team(&db, "Rustaceans", leader.id).await;

        let other = create_student(&db, "Other", "CS2021002", "other@example.com").await;

        let response = crate::app_router(Arc::new(db), Arc::new(Config::for_tests()))
            .oneshot(lock_request(other.id, team.id))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }
}
