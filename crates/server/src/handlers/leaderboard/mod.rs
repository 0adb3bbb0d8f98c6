/// Lowest scoring teams route.
mod bottom;

/// Full leaderboard route.
mod list;

/// Per-team leaderboard entry route.
mod team;

/// Top scoring teams route.
mod top;

use std::sync::Arc;

use axum::{routing::get, Router};
use db::{leaderboard, DatabaseConnection};
use serde::Serialize;

/// Number of entries returned by the top and bottom routes.
const HIGHLIGHT_LIMIT: u64 = 5;

/// Create a router that provides leaderboard routes for authenticated students.
pub(crate) fn routes() -> Router<Arc<DatabaseConnection>> {
    Router::new()
        .route("/", get(list::list))
        .route("/bottom", get(bottom::bottom))
        .route("/team/:id", get(team::team))
}

/// Create a router that provides publicly visible leaderboard routes.
pub(crate) fn public_routes() -> Router<Arc<DatabaseConnection>> {
    Router::new().route("/top", get(top::top))
}

/// Serializable leaderboard entry with its team name.
#[derive(Serialize)]
pub(super) struct LeaderboardEntryData {
    pub team_id: i64,
    pub team_name: String,
    pub meetings_done: i32,
    pub tasks_done: i32,
    pub mentor_feedback_count: i32,
    pub total_score: i32,
}

impl LeaderboardEntryData {
    pub(super) fn new(entry: leaderboard::Model, team_name: String) -> Self {
        LeaderboardEntryData {
            team_id: entry.team_id,
            team_name,
            meetings_done: entry.meetings_done,
            tasks_done: entry.tasks_done,
            mentor_feedback_count: entry.mentor_feedback_count,
            total_score: entry.total_score,
        }
    }
}
