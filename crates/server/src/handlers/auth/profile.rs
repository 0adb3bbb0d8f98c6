use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Extension, Json};
use axum_derive_error::ErrorResponse;
use db::{
    student, ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr, EntityTrait,
    TransactionErrorExt, TransactionTrait,
};
use derive_more::{Display, Error, From};
use serde::Deserialize;
use validator::Validate;

use super::StudentData;
use crate::{auth::AuthenticatedStudentId, validation::ValidatedJson};

/// Errors that may occur while reading or updating a profile.
#[derive(ErrorResponse, Display, From, Error)]
pub(super) enum ProfileError {
    /// Database-related error.
    DatabaseError(DbErr),

    /// Unable to hash the provided password.
    PasswordHashError(student::PasswordHashError),

    #[status(StatusCode::NOT_FOUND)]
    #[display(fmt = "Student not found")]
    StudentNotFound,
}

#[derive(Deserialize, Validate)]
pub(super) struct UpdateProfileRequest {
    #[validate(length(min = 3))]
    name: Option<String>,

    #[validate(range(min = 1, max = 5))]
    year: Option<i32>,

    #[validate(length(min = 8))]
    password: Option<String>,
}

/// Profile details handler.
pub(super) async fn profile(
    State(db): State<Arc<DatabaseConnection>>,
    Extension(student_id): Extension<AuthenticatedStudentId>,
) -> Result<Json<StudentData>, ProfileError> {
    let model = student::Entity::find_by_id(student_id.id())
        .one(&*db)
        .await?
        .ok_or(ProfileError::StudentNotFound)?;

    Ok(Json(model.into()))
}

/// Profile update handler.
///
/// Only the provided fields are touched; roll number and email
/// are immutable after registration.
pub(super) async fn update(
    State(db): State<Arc<DatabaseConnection>>,
    Extension(student_id): Extension<AuthenticatedStudentId>,
    ValidatedJson(request): ValidatedJson<UpdateProfileRequest>,
) -> Result<Json<StudentData>, ProfileError> {
    let model = db
        .transaction::<_, _, ProfileError>(|txn| {
            Box::pin(async move {
                let model = student::Entity::find_by_id(student_id.id())
                    .one(txn)
                    .await?
                    .ok_or(ProfileError::StudentNotFound)?;

                let mut active: student::ActiveModel = model.clone().into();

                active.name = ActiveValue::Set(request.name.unwrap_or(model.name));
                active.year = ActiveValue::Set(request.year.unwrap_or(model.year));
                active.password_hash = ActiveValue::Set(match request.password {
                    Some(password) => student::hash_password(&password)?,
                    None => model.password_hash,
                });

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

    use crate::testing::{bearer, create_database, create_student, RequestBodyExt, ResponseBodyExt};

    use assert_json::assert_json;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use common::config::Config;
    use serde_json::json;
    use tower::{Service, ServiceExt};

    #[tokio::test]
    async fn read() {
        let db = create_database().await;

        let student = create_student(&db, "Test Student", "CS2021001", "student@example.com").await;

        let response = crate::app_router(Arc::new(db), Arc::new(Config::for_tests()))
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/auth/profile")
                    .header("Authorization", bearer(student.id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        assert_json!(response.json().await, {
            "name": "Test Student",
            "roll_no": "CS2021001",
            "email": "student@example.com",
        });
    }

    #[tokio::test]
    async fn update() {
        let db = create_database().await;

        let student = create_student(&db, "Test Student", "CS2021001", "student@example.com").await;

        let mut service = crate::app_router(Arc::new(db), Arc::new(Config::for_tests()));

        let response = service
            .call(
                Request::builder()
                    .method("PUT")
                    .uri("/auth/profile")
                    .header("Authorization", bearer(student.id))
                    .header("Content-Type", "application/json")
                    .body(Body::from_json(json!({
                        "name": "Renamed Student",
                        "year": 3,
                        "password": "rotated-password",
                    })))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        assert_json!(response.json().await, {
            "name": "Renamed Student",
            "year": 3,
            "email": "student@example.com",
        });

        let response = service
            .call(
                Request::builder()
                    .method("POST")
                    .uri("/auth/login")
                    .header("Content-Type", "application/json")
                    .body(Body::from_json(json!({
                        "email": "student@example.com",
                        "password": "rotated-password",
                    })))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn missing_token() {
        let db = create_database().await;

        let response = crate::app_router(Arc::new(db), Arc::new(Config::for_tests()))
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/auth/profile")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn malformed_token() {
        let db = create_database().await;

        let response = crate::app_router(Arc::new(db), Arc::new(Config::for_tests()))
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/auth/profile")
                    .header("Authorization", "Bearer not-a-jwt")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
