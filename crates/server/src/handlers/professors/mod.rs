/// Available professors route.
mod available;

/// Professor details route.
mod details;

/// Professor listing route.
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
use db::{mentor_request, professor, DatabaseConnection};
use serde::Serialize;

/// Create a router that provides professor directory and mentorship request routes.
pub(crate) fn routes() -> Router<Arc<DatabaseConnection>> {
    Router::new()
        .route("/", get(list::list))
        .route("/available", get(available::available))
        .route("/request", post(request::request))
        .route("/requests/:id/respond", post(respond::respond))
        .route("/:id", get(details::details))
}

/// Serializable professor information.
#[derive(Serialize)]
pub(super) struct ProfessorData {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub department: String,
    pub accepted_team_count: i32,
}

impl From<professor::Model> for ProfessorData {
    fn from(model: professor::Model) -> Self {
        ProfessorData {
            id: model.id,
            name: model.name,
            email: model.email,
            department: model.department,
            accepted_team_count: model.accepted_team_count,
        }
    }
}

/// Serializable mentorship request information.
#[derive(Serialize)]
pub(super) struct RequestData {
    pub id: i64,
    pub team_id: i64,
    pub professor_id: i64,
    pub status: mentor_request::RequestStatus,
    pub message: Option<String>,
}

impl From<mentor_request::Model> for RequestData {
    fn from(model: mentor_request::Model) -> Self {
        RequestData {
            id: model.id,
            team_id: model.team_id,
            professor_id: model.professor_id,
            status: model.status,
            message: model.message,
        }
    }
}
