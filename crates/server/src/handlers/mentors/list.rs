use std::sync::Arc;

use axum::{extract::State, Json};
use axum_derive_error::ErrorResponse;
use db::{mentor, DatabaseConnection, DbErr, EntityTrait};
use derive_more::{Display, Error, From};

use super::MentorData;

/// Errors that may occur while listing mentors.
#[derive(ErrorResponse, Display, From, Error)]
pub(super) enum ListMentorsError {
    /// Database-related error.
    DatabaseError(DbErr),
}

/// Mentor listing handler.
pub(super) async fn list(
    State(db): State<Arc<DatabaseConnection>>,
) -> Result<Json<Vec<MentorData>>, ListMentorsError> {
    let mentors = mentor::Entity::find().all(&*db).await?;

    Ok(Json(mentors.into_iter().map(Into::into).collect()))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::testing::{bearer, create_database, create_mentor, create_student, ResponseBodyExt};

    use assert_json::assert_json;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use common::config::Config;
    use tower::ServiceExt;

    #[tokio::test]
    async fn list() {
        let db = create_database().await;

        let student = create_student(&db, "Student", "CS2021001", "student@example.com").await;
        create_mentor(&db, "Senior Mentor", "mentor@example.com").await;

        let response = crate::app_router(Arc::new(db), Arc::new(Config::for_tests()))
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/mentors")
                    .header("Authorization", bearer(student.id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        assert_json!(response.json().await, [
            {
                "name": "Senior Mentor",
                "email": "mentor@example.com",
            }
        ]);
    }
}
