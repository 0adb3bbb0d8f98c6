/// Mentor details route.
mod details;

/// Mentor listing route.
mod list;

/// Mentorship request creation route.
mod request;

/// Mentorship request response route.
mod respond;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use db::{mentor, senior_mentor_request, DatabaseConnection};
use serde::Serialize;

/// Create a router that provides senior mentor directory and mentorship request routes.
pub(crate) fn routes() -> Router<Arc<DatabaseConnection>> {
    Router::new()
        .route("/", get(list::list))
        .route("/request", post(request::request))
        .route("/requests/:id/respond", post(respond::respond))
        .route("/:id", get(details::details))
}

/// Serializable senior mentor information.
#[derive(Serialize)]
pub(super) struct MentorData {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub year: i32,
}

impl From<mentor::Model> for MentorData {
    fn from(model: mentor::Model) -> Self {
        MentorData {
            id: model.id,
            name: model.name,
            email: model.email,
            year: model.year,
        }
    }
}

/// Serializable senior mentorship request information.
#[derive(Serialize)]
pub(super) struct RequestData {
    pub id: i64,
    pub team_id: i64,
    pub mentor_id: i64,
    pub status: senior_mentor_request::RequestStatus,
    pub message: Option<String>,
}

impl From<senior_mentor_request::Model> for RequestData {
    fn from(model: senior_mentor_request::Model) -> Self {
        RequestData {
            id: model.id,
            team_id: model.team_id,
            mentor_id: model.mentor_id,
            status: model.status,
            message: model.message,
        }
    }
}
