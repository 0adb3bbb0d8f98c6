use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Extension, Json};
use axum_derive_error::ErrorResponse;
use common::config::Config;
use db::{student, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter};
use derive_more::{Display, Error, From};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::StudentData;
use crate::{auth, validation::ValidatedJson};

/// Errors that may occur during the login process.
#[derive(ErrorResponse, Display, From, Error)]
pub(super) enum StudentLoginError {
    /// Database-related error.
    DatabaseError(DbErr),

    /// Unable to sign an access token.
    TokenError(jsonwebtoken::errors::Error),

    #[status(StatusCode::UNAUTHORIZED)]
    #[display(fmt = "Invalid email or password")]
    InvalidCredentials,
}

#[derive(Deserialize, Validate)]
pub(super) struct LoginRequest {
    #[validate(email)]
    email: String,

    #[validate(length(min = 1))]
    password: String,
}

#[derive(Serialize)]
pub(super) struct LoginResponse {
    token: String,
    student: StudentData,
}

/// Student login handler.
///
/// Unknown emails and wrong passwords are deliberately
/// indistinguishable in the response.
pub(super) async fn login(
    State(db): State<Arc<DatabaseConnection>>,
    Extension(config): Extension<Arc<Config>>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<Json<LoginResponse>, StudentLoginError> {
    let model = student::Entity::find()
        .filter(student::Column::Email.eq(&*request.email))
        .one(&*db)
        .await?
        .ok_or(StudentLoginError::InvalidCredentials)?;

    if !student::verify_password(&request.password, &model.password_hash) {
        return Err(StudentLoginError::InvalidCredentials);
    }

    let token = auth::issue_token(model.id, &config.auth)?;

    Ok(Json(LoginResponse {
        token,
        student: model.into(),
    }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::testing::{create_database, create_student, RequestBodyExt, ResponseBodyExt};

    use assert_json::{assert_json, validators};
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use common::config::Config;
    use serde_json::json;
    use tower::ServiceExt;

    fn login_request(email: &str, password: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/auth/login")
            .header("Content-Type", "application/json")
            .body(Body::from_json(json!({
                "email": email,
                "password": password,
            })))
            .unwrap()
    }

    #[tokio::test]
    async fn successful() {
        let db = create_database().await;

        create_student(&db, "Test Student", "CS2021001", "student@example.com").await;

        let response = crate::app_router(Arc::new(db), Arc::new(Config::for_tests()))
            .oneshot(login_request("student@example.com", "password123"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        assert_json!(response.json().await, {
            "token": validators::string(|val| {
                (!val.is_empty())
                    .then_some(())
                    .ok_or(String::from("empty token"))
            }),
            "student": {
                "email": "student@example.com",
            }
        });
    }

    #[tokio::test]
    async fn wrong_password() {
        let db = create_database().await;

        create_student(&db, "Test Student", "CS2021001", "student@example.com").await;

        let response = crate::app_router(Arc::new(db), Arc::new(Config::for_tests()))
            .oneshot(login_request("student@example.com", "not-the-password"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(response.error().await, "Invalid email or password");
    }

    #[tokio::test]
    async fn unknown_email() {
        let db = create_database().await;

        let response = crate::app_router(Arc::new(db), Arc::new(Config::for_tests()))
            .oneshot(login_request("nobody@example.com", "password123"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
