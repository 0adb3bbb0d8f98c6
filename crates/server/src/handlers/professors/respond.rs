use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use axum_derive_error::ErrorResponse;
use db::{
    mentor_request, professor, team, ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr,
    EntityTrait, QuerySelect, TransactionErrorExt, TransactionTrait,
};
use derive_more::{Display, Error, From};
use serde::Deserialize;
use validator::Validate;

use super::RequestData;
use crate::validation::ValidatedJson;

/// Errors that may occur while responding to a mentorship request.
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
    #[display(fmt = "Professor not found")]
    ProfessorNotFound,

    #[status(StatusCode::BAD_REQUEST)]
    #[display(fmt = "Professor cannot accept more teams")]
    ProfessorFull,

    #[status(StatusCode::NOT_FOUND)]
    #[display(fmt = "Team not found")]
    TeamNotFound,

    #[status(StatusCode::BAD_REQUEST)]
    #[display(fmt = "Team already has a professor")]
    TeamHasProfessor,
}

#[derive(Deserialize, Validate)]
pub(super) struct RespondRequest {
    status: mentor_request::RequestStatus,
}

/// Mentorship request response handler.
///
/// Acceptance re-checks the professor's capacity against an
/// exclusively locked professor row, so two concurrent
/// acceptances cannot overshoot the ceiling.
pub(super) async fn respond(
    State(db): State<Arc<DatabaseConnection>>,
    Path(request_id): Path<i64>,
    ValidatedJson(request): ValidatedJson<RespondRequest>,
) -> Result<Json<RequestData>, RespondError> {
    if request.status == mentor_request::RequestStatus::Pending {
        return Err(RespondError::InvalidStatus);
    }

    let model = db
        .transaction(|txn| {
            Box::pin(async move {
                let model = mentor_request::Entity::find_by_id(request_id)
                    .one(txn)
                    .await?
                    .ok_or(RespondError::RequestNotFound)?;

                if model.status != mentor_request::RequestStatus::Pending {
                    return Err(RespondError::AlreadyResponded);
                }

                if request.status == mentor_request::RequestStatus::Accepted {
                    let professor = professor::Entity::find_by_id(model.professor_id)
                        .lock_exclusive()
                        .one(txn)
                        .await?
                        .ok_or(RespondError::ProfessorNotFound)?;

                    if professor.accepted_team_count >= professor::MAX_MENTORED_TEAMS {
                        return Err(RespondError::ProfessorFull);
                    }

                    // Another professor may have accepted a parallel request
                    // since this one was sent.
                    let requesting_team = team::Entity::find_by_id(model.team_id)
                        .one(txn)
                        .await?
                        .ok_or(RespondError::TeamNotFound)?;

                    if requesting_team.professor_id.is_some() {
                        return Err(RespondError::TeamHasProfessor);
                    }

                    team::ActiveModel {
                        id: ActiveValue::Unchanged(requesting_team.id),
                        professor_id: ActiveValue::Set(Some(professor.id)),
                        ..Default::default()
                    }
                    .update(txn)
                    .await?;

                    let count = professor.accepted_team_count;
                    let mut active: professor::ActiveModel = professor.into();
                    active.accepted_team_count = ActiveValue::Set(count + 1);
                    active.update(txn).await?;
                }

                let mut active: mentor_request::ActiveModel = model.into();
                active.status = ActiveValue::Set(request.status);

                Ok(active.update(txn).await?)
            })
        })
        .await
        .into_raw_result()?;

    Ok(Json(model.into()))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::testing::{
        bearer, create_database, create_professor, create_student, create_team, RequestBodyExt,
        ResponseBodyExt,
    };

    use assert_json::assert_json;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use common::config::Config;
    use db::{mentor_request, professor, team, ActiveValue, DatabaseConnection, EntityTrait};
    use serde_json::json;
    use tower::{Service, ServiceExt};

    async fn create_request(db: &DatabaseConnection, team_id: i64, professor_id: i64) -> i64 {
        mentor_request::Entity::insert(mentor_request::ActiveModel {
            team_id: ActiveValue::Set(team_id),
            professor_id: ActiveValue::Set(professor_id),
            status: ActiveValue::Set(mentor_request::RequestStatus::Pending),
            message: ActiveValue::Set(None),
            created_at: ActiveValue::Set(db::now()),
            ..Default::default()
        })
        .exec_with_returning(db)
        .await
        .expect("unable to create request")
        .id
    }

    fn respond_request(student_id: i64, request_id: i64, status: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(format!("/professors/requests/{request_id}/respond"))
            .header("Authorization", bearer(student_id))
            .header("Content-Type", "application/json")
            .body(Body::from_json(json!({ "status": status })))
            .unwrap()
    }

    #[tokio::test]
    async fn acceptance_links_professor_to_team() {
        let db = create_database().await;

        let leader = create_student(&db, "Leader", "CS2021001", "leader@example.com").await;
        let created_team = create_team(&db, "Rustaceans", leader.id).await;
        let professor = create_professor(&db, "Dr. Smith", "smith@example.edu").await;

        let request_id = create_request(&db, created_team.id, professor.id).await;

        let db = Arc::new(db);

        let response = crate::app_router(db.clone(), Arc::new(Config::for_tests()))
            .oneshot(respond_request(leader.id, request_id, "accepted"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        assert_json!(response.json().await, {
            "status": "accepted",
        });

        let updated_team = team::Entity::find_by_id(created_team.id)
            .one(&*db)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated_team.professor_id, Some(professor.id));

        let updated_professor = professor::Entity::find_by_id(professor.id)
            .one(&*db)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated_professor.accepted_team_count, 1);
    }

    #[tokio::test]
    async fn second_response_is_rejected() {
        let db = create_database().await;

        let leader = create_student(&db, "Leader", "CS2021001", "leader@example.com").await;
        let team = create_team(&db, "Rustaceans", leader.id).await;
        let professor = create_professor(&db, "Dr. Smith", "smith@example.edu").await;

        let request_id = create_request(&db, team.id, professor.id).await;

        let mut service = crate::app_router(Arc::new(db), Arc::new(Config::for_tests()));

        let response = service
            .call(respond_request(leader.id, request_id, "rejected"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let response = service
            .call(respond_request(leader.id, request_id, "accepted"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.error().await,
            "Request has already been responded to"
        );
    }

    #[tokio::test]
    async fn full_professor_cannot_accept() {
        let db = create_database().await;

        let professor = create_professor(&db, "Dr. Smith", "smith@example.edu").await;

        let mut last_request_id = 0;

        for i in 1..=4 {
            let leader = create_student(
                &db,
                &format!("Leader {i}"),
                &format!("CS202100{i}"),
                &format!("leader{i}@example.com"),
            )
            .await;

            let team = create_team(&db, &format!("Team {i}"), leader.id).await;

            last_request_id = create_request(&db, team.id, professor.id).await;
        }

        let responder = create_student(&db, "Responder", "CS2021009", "responder@example.com").await;

        let mut service = crate::app_router(Arc::new(db), Arc::new(Config::for_tests()));

        for request_id in last_request_id - 3..last_request_id {
            let response = service
                .call(respond_request(responder.id, request_id, "accepted"))
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::OK);
        }

        let response = service
            .call(respond_request(responder.id, last_request_id, "accepted"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(response.error().await, "Professor cannot accept more teams");
    }

    #[tokio::test]
    async fn second_acceptance_keeps_first_professor() {
        let db = create_database().await;

        let leader = create_student(&db, "Leader", "CS2021001", "leader@example.com").await;
        let created_team = create_team(&db, "Rustaceans", leader.id).await;

        let first = create_professor(&db, "Dr. Smith", "smith@example.edu").await;
        let second = create_professor(&db, "Dr. Jones", "jones@example.edu").await;

        let first_request = create_request(&db, created_team.id, first.id).await;
        let second_request = create_request(&db, created_team.id, second.id).await;

        let db = Arc::new(db);

        let mut service = crate::app_router(db.clone(), Arc::new(Config::for_tests()));

        let response = service
            .call(respond_request(leader.id, first_request, "accepted"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let response = service
            .call(respond_request(leader.id, second_request, "accepted"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(response.error().await, "Team already has a professor");

        let updated_team = team::Entity::find_by_id(created_team.id)
            .one(&*db)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated_team.professor_id, Some(first.id));

        let second = professor::Entity::find_by_id(second.id)
            .one(&*db)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(second.accepted_team_count, 0);
    }

    #[tokio::test]
    async fn pending_status_is_rejected() {
        let db = create_database().await;

        let leader = create_student(&db, "Leader", "CS2021001", "leader@example.com").await;
        let team = create_team(&db, "Rustaceans", leader.id).await;
        let professor = create_professor(&db, "Dr. Smith", "smith@example.edu").await;

        let request_id = create_request(&db, team.id, professor.id).await;

        let response = crate::app_router(Arc::new(db), Arc::new(Config::for_tests()))
            .oneshot(respond_request(leader.id, request_id, "pending"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(response.error().await, "Invalid status");
    }
}
