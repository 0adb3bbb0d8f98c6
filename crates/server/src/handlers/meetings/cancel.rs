use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use axum_derive_error::ErrorResponse;
use db::{
    meeting, team, ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr, EntityTrait,
    TransactionErrorExt, TransactionTrait,
};
use derive_more::{Display, Error, From};

use super::MeetingData;
use crate::auth::AuthenticatedStudentId;

/// Errors that may occur while canceling a meeting.
#[derive(ErrorResponse, Display, From, Error)]
pub(super) enum CancelMeetingError {
    /// Database-related error.
    DatabaseError(DbErr),

    #[status(StatusCode::NOT_FOUND)]
    #[display(fmt = "Meeting not found")]
    MeetingNotFound,

    #[status(StatusCode::NOT_FOUND)]
    #[display(fmt = "Team not found")]
    TeamNotFound,

    #[status(StatusCode::FORBIDDEN)]
    #[display(fmt = "Only team leader can cancel meetings")]
    NotTeamLeader,

    #[status(StatusCode::BAD_REQUEST)]
    #[display(fmt = "Only scheduled meetings can be canceled")]
    NotScheduled,
}

/// Meeting cancellation handler.
pub(super) async fn cancel(
    State(db): State<Arc<DatabaseConnection>>,
    Extension(student_id): Extension<AuthenticatedStudentId>,
    Path(meeting_id): Path<i64>,
) -> Result<Json<MeetingData>, CancelMeetingError> {
    let model = db
        .transaction(|txn| {
            Box::pin(async move {
                let model = meeting::Entity::find_by_id(meeting_id)
                    .one(txn)
                    .await?
                    .ok_or(CancelMeetingError::MeetingNotFound)?;

                let team = team::Entity::find_by_id(model.team_id)
                    .one(txn)
                    .await?
                    .ok_or(CancelMeetingError::TeamNotFound)?;

                if team.leader_id != student_id.id() {
                    return Err(CancelMeetingError::NotTeamLeader);
                }

                if model.status != meeting::Status::Scheduled {
                    return Err(CancelMeetingError::NotScheduled);
                }

                let mut active: meeting::ActiveModel = model.into();
                active.status = ActiveValue::Set(meeting::Status::Canceled);

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
        bearer, create_database, create_student, create_team, RequestBodyExt, ResponseBodyExt,
    };

    use assert_json::assert_json;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use common::config::Config;
    use serde_json::json;
    use tower::Service;

    async fn schedule_meeting(service: &mut axum::Router, leader_id: i64) -> i64 {
        let response = service
            .call(
                Request::builder()
                    .method("POST")
                    .uri("/meetings")
                    .header("Authorization", bearer(leader_id))
                    .header("Content-Type", "application/json")
                    .body(Body::from_json(json!({
                        "title": "Progress review",
                        "scheduled_at": "2099-01-01T10:00:00Z",
                    })))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);

        response.json().await["id"].as_i64().unwrap()
    }

    fn cancel_request(student_id: i64, meeting_id: i64) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(format!("/meetings/{meeting_id}/cancel"))
            .header("Authorization", bearer(student_id))
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn double_cancellation_is_rejected() {
        let db = create_database().await;

        let leader = create_student(&db, "Leader", "CS2021001", "leader@example.com").await;
        create_team(&db, "Rustaceans", leader.id).await;

        let mut service = crate::app_router(Arc::new(db), Arc::new(Config::for_tests()));

        let meeting_id = schedule_meeting(&mut service, leader.id).await;

        let response = service
            .call(cancel_request(leader.id, meeting_id))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        assert_json!(response.json().await, {
            "status": "canceled",
        });

        let response = service
            .call(cancel_request(leader.id, meeting_id))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.error().await,
            "Only scheduled meetings can be canceled"
        );
    }

    #[tokio::test]
    async fn member_cannot_cancel() {
        let db = create_database().await;

        let leader = create_student(&db, "Leader", "CS2021001", "leader@example.com").await;
        let team = create_team(&db, "Rustaceans", leader.id).await;

        let member = create_student(&db, "Member", "CS2021002", "member@example.com").await;

        let mut service = crate::app_router(Arc::new(db), Arc::new(Config::for_tests()));

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

        assert_eq!(response.status(), StatusCode::OK);

        let meeting_id = schedule_meeting(&mut service, leader.id).await;

        let response = service
            .call(cancel_request(member.id, meeting_id))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(response.error().await, "Only team leader can cancel meetings");
    }
}
