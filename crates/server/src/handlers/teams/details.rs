use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use axum_derive_error::ErrorResponse;
use db::{student, team, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter};
use derive_more::{Display, Error, From};

use super::TeamDetailsData;

/// Errors that may occur while fetching team details.
#[derive(ErrorResponse, Display, From, Error)]
pub(super) enum TeamDetailsError {
    /// Database-related error.
    DatabaseError(DbErr),

    #[status(StatusCode::NOT_FOUND)]
    #[display(fmt = "Team not found")]
    TeamNotFound,
}

/// Team details handler.
pub(super) async fn details(
    State(db): State<Arc<DatabaseConnection>>,
    Path(team_id): Path<i64>,
) -> Result<Json<TeamDetailsData>, TeamDetailsError> {
    let team = team::Entity::find_by_id(team_id)
        .one(&*db)
        .await?
        .ok_or(TeamDetailsError::TeamNotFound)?;

    let members = student::Entity::find()
        .filter(student::Column::TeamId.eq(team.id))
        .all(&*db)
        .await?;

    Ok(Json(TeamDetailsData::new(team, members)))
}
