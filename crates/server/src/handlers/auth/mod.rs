/// Student authentication route.
mod login;

/// Student profile routes.
mod profile;

/// Student registration route.
mod register;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use db::{student, DatabaseConnection};
use serde::Serialize;

/// Create a router with routes that are available without authentication.
pub(crate) fn routes() -> Router<Arc<DatabaseConnection>> {
    Router::new()
        .route("/login", post(login::login))
        .route("/register", post(register::register))
}

/// Create a router with profile routes that require an authenticated student.
pub(crate) fn profile_routes() -> Router<Arc<DatabaseConnection>> {
    Router::new().route("/profile", get(profile::profile).put(profile::update))
}

/// Serializable student account information.
///
/// The password hash never leaves the database layer.
#[derive(Serialize)]
pub(super) struct StudentData {
    pub id: i64,
    pub name: String,
    pub roll_no: String,
    pub email: String,
    pub year: i32,
    pub team_id: Option<i64>,
}

impl From<student::Model> for StudentData {
    fn from(model: student::Model) -> Self {
        StudentData {
            id: model.id,
            name: model.name,
            roll_no: model.roll_no,
            email: model.email,
            year: model.year,
            team_id: model.team_id,
        }
    }
}
