/// Team creation route.
mod create;

/// Team details route.
mod details;

/// Team invitation route.
mod invite;

/// Team joining route.
mod join;

/// Team listing route.
mod list;

/// Manual team locking route.
mod lock;

/// Current team route.
mod my_team;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use db::{student, team, DatabaseConnection};
use serde::Serialize;

/// Create a router that provides team management routes.
pub(crate) fn routes() -> Router<Arc<DatabaseConnection>> {
    Router::new()
        .route("/", post(create::create).get(list::list))
        .route("/my-team", get(my_team::my_team))
        .route("/:id", get(details::details))
        .route("/:id/join", post(join::join))
        .route("/:id/invite", post(invite::invite))
        .route("/:id/lock", post(lock::lock))
}

/// Serializable team summary.
#[derive(Serialize)]
pub(super) struct TeamData {
    pub id: i64,
    pub name: String,
    pub is_locked: bool,
    pub leader_id: i64,
    pub professor_id: Option<i64>,
    pub senior_mentor_id: Option<i64>,
    pub member_count: u64,
}

impl TeamData {
    pub(super) fn new(model: team::Model, member_count: u64) -> Self {
        TeamData {
            id: model.id,
            name: model.name,
            is_locked: model.is_locked,
            leader_id: model.leader_id,
            professor_id: model.professor_id,
            senior_mentor_id: model.senior_mentor_id,
            member_count,
        }
    }
}

/// Serializable team member information.
#[derive(Serialize)]
pub(super) struct MemberData {
    pub id: i64,
    pub name: String,
    pub roll_no: String,
    pub email: String,
    pub year: i32,
}

impl From<student::Model> for MemberData {
    fn from(model: student::Model) -> Self {
        MemberData {
            id: model.id,
            name: model.name,
            roll_no: model.roll_no,
            email: model.email,
            year: model.year,
        }
    }
}

/// Serializable team details with the full member list.
#[derive(Serialize)]
pub(super) struct TeamDetailsData {
    pub id: i64,
    pub name: String,
    pub is_locked: bool,
    pub leader_id: i64,
    pub professor_id: Option<i64>,
    pub senior_mentor_id: Option<i64>,
    pub member_count: usize,
    pub members: Vec<MemberData>,
}

impl TeamDetailsData {
    pub(super) fn new(model: team::Model, members: Vec<student::Model>) -> Self {
        TeamDetailsData {
            id: model.id,
            name: model.name,
            is_locked: model.is_locked,
            leader_id: model.leader_id,
            professor_id: model.professor_id,
            senior_mentor_id: model.senior_mentor_id,
            member_count: members.len(),
            members: members.into_iter().map(Into::into).collect(),
        }
    }
}
