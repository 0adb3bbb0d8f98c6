use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use axum_derive_error::ErrorResponse;
use db::{professor, DatabaseConnection, DbErr, EntityTrait};
use derive_more::{Display, Error, From};

use super::ProfessorData;

/// Errors that may occur while fetching professor details.
#[derive(ErrorResponse, Display, From, Error)]
pub(super) enum ProfessorDetailsError {
    /// Database-related error.
    DatabaseError(DbErr),

    #[status(StatusCode::NOT_FOUND)]
    #[display(fmt = "Professor not found")]
    ProfessorNotFound,
}

/// Professor details handler.
pub(super) async fn details(
    State(db): State<Arc<DatabaseConnection>>,
    Path(professor_id): Path<i64>,
) -> Result<Json<ProfessorData>, ProfessorDetailsError> {
    let model = professor::Entity::find_by_id(professor_id)
        .one(&*db)
        .await?
        .ok_or(ProfessorDetailsError::ProfessorNotFound)?;

    Ok(Json(model.into()))
}
