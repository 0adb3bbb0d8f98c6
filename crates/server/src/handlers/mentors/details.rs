use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use axum_derive_error::ErrorResponse;
use db::{mentor, DatabaseConnection, DbErr, EntityTrait};
use derive_more::{Display, Error, From};

use super::MentorData;

/// Errors that may occur while fetching mentor details.
#[derive(ErrorResponse, Display, From, Error)]
pub(super) enum MentorDetailsError {
    /// Database-related error.
    DatabaseError(DbErr),

    #[status(StatusCode::NOT_FOUND)]
    #[display(fmt = "Mentor not found")]
    MentorNotFound,
}

/// Mentor details handler.
pub(super) async fn details(
    State(db): State<Arc<DatabaseConnection>>,
    Path(mentor_id): Path<i64>,
) -> Result<Json<MentorData>, MentorDetailsError> {
    let model = mentor::Entity::find_by_id(mentor_id)
        .one(&*db)
        .await?
        .ok_or(MentorDetailsError::MentorNotFound)?;

    Ok(Json(model.into()))
}
