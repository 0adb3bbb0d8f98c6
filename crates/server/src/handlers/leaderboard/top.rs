use std::sync::Arc;

use axum::{extract::State, Json};
use axum_derive_error::ErrorResponse;
use db::{leaderboard, team, DatabaseConnection, DbErr, EntityTrait, QueryOrder, QuerySelect};
use derive_more::{Display, Error, From};

use super::{LeaderboardEntryData, HIGHLIGHT_LIMIT};

/// Errors that may occur while listing top teams.
#[derive(ErrorResponse, Display, From, Error)]
pub(super) enum TopTeamsError {
    /// Database-related error.
    DatabaseError(DbErr),
}

/// Top teams handler.
///
/// This route is public, so that the standings can be shown on
/// the event's landing page without a login.
pub(super) async fn top(
    State(db): State<Arc<DatabaseConnection>>,
) -> Result<Json<Vec<LeaderboardEntryData>>, TopTeamsError> {
    let entries = leaderboard::Entity::find()
        .find_also_related(team::Entity)
        .order_by_desc(leaderboard::Column::TotalScore)
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
