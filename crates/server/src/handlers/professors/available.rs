use std::sync::Arc;

use axum::{extract::State, Json};
use axum_derive_error::ErrorResponse;
use db::{professor, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter};
use derive_more::{Display, Error, From};

use super::ProfessorData;

/// Errors that may occur while listing available professors.
#[derive(ErrorResponse, Display, From, Error)]
pub(super) enum AvailableProfessorsError {
    /// Database-related error.
    DatabaseError(DbErr),
}

/// Available professors handler.
///
/// Lists only professors that still have mentoring capacity left.
pub(super) async fn available(
    State(db): State<Arc<DatabaseConnection>>,
) -> Result<Json<Vec<ProfessorData>>, AvailableProfessorsError> {
    let professors = professor::Entity::find()
        .filter(professor::Column::AcceptedTeamCount.lt(professor::MAX_MENTORED_TEAMS))
        .all(&*db)
        .await?;

    Ok(Json(professors.into_iter().map(Into::into).collect()))
}
