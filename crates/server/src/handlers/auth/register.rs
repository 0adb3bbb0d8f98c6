use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Extension, Json};
use axum_derive_error::ErrorResponse;
use common::config::Config;
use db::{
    student, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QuerySelect, SelectExt, TransactionErrorExt, TransactionTrait,
};
use derive_more::{Display, Error, From};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::StudentData;
use crate::{auth, validation::ValidatedJson};

/// Errors that may occur during the student registration process.
#[derive(ErrorResponse, Display, From, Error)]
pub(super) enum StudentRegistrationError {
    /// Database-related error.
    DatabaseError(DbErr),

    /// Unable to hash the provided password.
    PasswordHashError(student::PasswordHashError),

    /// Unable to sign an access token.
    TokenError(jsonwebtoken::errors::Error),

    #[status(StatusCode::BAD_REQUEST)]
    #[display(fmt = "Email already registered")]
    EmailTaken,

    #[status(StatusCode::BAD_REQUEST)]
    #[display(fmt = "Roll number already registered")]
    RollNumberTaken,
}

#[derive(Deserialize, Validate)]
pub(super) struct RegistrationRequest {
    #[validate(length(min = 3))]
    name: String,

    #[validate(length(min = 3))]
    roll_no: String,

    #[validate(email)]
    email: String,

    #[validate(length(min = 8))]
    password: String,

    #[validate(range(min = 1, max = 5))]
    year: i32,
}

#[derive(Serialize)]
pub(super) struct RegistrationResponse {
    token: String,
    student: StudentData,
}

/// Student registration handler.
///
/// A successful registration immediately returns an access token
/// so that clients do not have to follow up with a login request.
pub(super) async fn register(
    State(db): State<Arc<DatabaseConnection>>,
    Extension(config): Extension<Arc<Config>>,
    ValidatedJson(request): ValidatedJson<RegistrationRequest>,
) -> Result<(StatusCode, Json<RegistrationResponse>), StudentRegistrationError> {
    let password_hash = student::hash_password(&request.password)?;

    let model = db
        .transaction(|txn| {
            Box::pin(async move {
                let email_taken = student::Entity::find()
                    .select_only()
                    .filter(student::Column::Email.eq(&*request.email))
                    .exists(txn)
                    .await?;

                if email_taken {
                    return Err(StudentRegistrationError::EmailTaken);
                }

                let roll_no_taken = student::Entity::find()
                    .select_only()
                    .filter(student::Column::RollNo.eq(&*request.roll_no))
                    .exists(txn)
                    .await?;

                if roll_no_taken {
                    return Err(StudentRegistrationError::RollNumberTaken);
                }

                let model = student::Entity::insert(student::ActiveModel {
                    name: ActiveValue::Set(request.name),
                    roll_no: ActiveValue::Set(request.roll_no),
                    email: ActiveValue::Set(request.email),
                    password_hash: ActiveValue::Set(password_hash),
                    year: ActiveValue::Set(request.year),
                    created_at: ActiveValue::Set(db::now()),
                    ..Default::default()
                })
                .exec_with_returning(txn)
                .await?;

                Ok(model)
            })
        })
        .await
        .into_raw_result()?;

    let token = auth::issue_token(model.id, &config.auth)?;

    Ok((
        StatusCode::CREATED,
        Json(RegistrationResponse {
            token,
            student: model.into(),
        }),
    ))
}
