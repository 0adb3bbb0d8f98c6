use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use axum_derive_error::ErrorResponse;
use db::{
    leaderboard, team, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
};
use derive_more::{Display, Error, From};

use super::LeaderboardEntryData;

/// Errors that may occur while fetching a team's leaderboard entry.
#[derive(ErrorResponse, Display, From, Error)]
pub(super) enum TeamEntryError {
    /// Database-related error.
    DatabaseError(DbErr),

    #[status(StatusCode::NOT_FOUND)]
    #[display(fmt = "Leaderboard entry not found for this team")]
    EntryNotFound,
}

/// Per-team leaderboard entry handler.
pub(super) async fn team(
    State(db): State<Arc<DatabaseConnection>>,
    Path(team_id): Path<i64>,
) -> Result<Json<LeaderboardEntryData>, TeamEntryError> {
    let (entry, team) = leaderboard::Entity::find()
        .find_also_related(team::Entity)
        .filter(leaderboard::Column::TeamId.eq(team_id))
        .one(&*db)
        .await?
        .ok_or(TeamEntryError::EntryNotFound)?;

    let team_name = team.map(|team| team.name).unwrap_or_default();

    Ok(Json(LeaderboardEntryData::new(entry, team_name)))
}
