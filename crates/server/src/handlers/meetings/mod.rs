/// Meeting cancellation route.
mod cancel;

/// Meeting completion route.
mod complete;

/// Meeting scheduling route.
mod create;

/// Meeting details route.
mod details;

/// Team meeting listing route.
mod team;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use db::{meeting, DatabaseConnection};
use serde::Serialize;

/// Create a router that provides meeting scheduling and lifecycle routes.
pub(crate) fn routes() -> Router<Arc<DatabaseConnection>> {
    Router::new()
        .route("/", post(create::create))
        .route("/team/:id", get(team::team_meetings))
        .route("/:id", get(details::details))
        .route("/:id/complete", post(complete::complete))
        .route("/:id/cancel", post(cancel::cancel))
}

/// Serializable meeting information.
///
/// Timestamps are serialized as Unix seconds.
#[derive(Serialize)]
pub(super) struct MeetingData {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub scheduled_at: i64,
    pub status: meeting::Status,
    pub feedback: Option<String>,
    pub team_id: i64,
    pub professor_id: Option<i64>,
    pub mentor_id: Option<i64>,
}

impl From<meeting::Model> for MeetingData {
    fn from(model: meeting::Model) -> Self {
        MeetingData {
            id: model.id,
            title: model.title,
            description: model.description,
            scheduled_at: model.scheduled_at.assume_utc().unix_timestamp(),
            status: model.status,
            feedback: model.feedback,
            team_id: model.team_id,
            professor_id: model.professor_id,
            mentor_id: model.mentor_id,
        }
    }
}
