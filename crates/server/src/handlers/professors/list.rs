use std::sync::Arc;

use axum::{extract::State, Json};
use axum_derive_error::ErrorResponse;
use db::{professor, DatabaseConnection, DbErr, EntityTrait};
use derive_more::{Display, Error, From};

use super::ProfessorData;

/// Errors that may occur while listing professors.
#[derive(ErrorResponse, Display, From, Error)]
pub(super) enum ListProfessorsError {
    /// Database-related error.
    DatabaseError(DbErr),
}

/// Professor listing handler.
pub(super) async fn list(
    State(db): State<Arc<DatabaseConnection>>,
) -> Result<Json<Vec<ProfessorData>>, ListProfessorsError> {
    let professors = professor::Entity::find().all(&*db).await?;

    Ok(Json(professors.into_iter().map(Into::into).collect()))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::testing::{bearer, create_database, create_student, ResponseBodyExt};

    use assert_json::assert_json;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use common::config::Config;
    use db::{professor, ActiveValue, EntityTrait};
    use tower::ServiceExt;

    #[tokio::test]
    async fn list() {
        let db = create_database().await;

        let student = create_student(&db, "Student", "CS2021001", "student@example.com").await;

        professor::Entity::insert(professor::ActiveModel {
            name: ActiveValue::Set(String::from("Dr. Smith")),
            email: ActiveValue::Set(String::from("smith@example.edu")),
            department: ActiveValue::Set(String::from("Computer Science")),
            accepted_team_count: ActiveValue::Set(0),
            created_at: ActiveValue::Set(db::now()),
            ..Default::default()
        })
        .exec_without_returning(&db)
        .await
        .expect("unable to insert professor");

        let response = crate::app_router(Arc::new(db), Arc::new(Config::for_tests()))
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/professors")
                    .header("Authorization", bearer(student.id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        assert_json!(response.json().await, [
            {
                "name": "Dr. Smith",
                "department": "Computer Science",
                "accepted_team_count": 0,
            }
        ]);
    }
}
