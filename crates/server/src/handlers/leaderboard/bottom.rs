use std::sync::Arc;

use axum::{extract::State, Json};
use axum_derive_error::ErrorResponse;
use db::{leaderboard, team, DatabaseConnection, DbErr, EntityTrait, QueryOrder, QuerySelect};
use derive_more::{Display, Error, From};

use super::{LeaderboardEntryData, HIGHLIGHT_LIMIT};

/// Errors that may occur while listing bottom teams.
#[derive(ErrorResponse, Display, From, Error)]
pub(super) enum BottomTeamsError {
    /// Database-related error.
    DatabaseError(DbErr),
}

/// Bottom teams handler, lowest score first.
pub(super) async fn bottom(
    State(db): State<Arc<DatabaseConnection>>,
) -> Result<Json<Vec<LeaderboardEntryData>>, BottomTeamsError> {
    let entries = leaderboard::Entity::find()
        .find_also_related(team::Entity)
        .order_by_asc(leaderboard::Column::TotalScore)
        .limit(HIGHLIGHT_LIMIT)
        .all(&*db)
        .await?;

    Ok(Json(
        entries
            .into_iter()
            .map(|(entry, team)| {
                let team_name = team.map(|team| team.name).unwrap_or_default();

                LeaderboardEntryData::new(entry, team_name)
            })
            .collect(),
    ))
}
