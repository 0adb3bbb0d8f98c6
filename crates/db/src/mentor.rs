//! Senior student mentor.
//!
//! Assigned to teams via a request flow separate from faculty
//! professors, with no capacity ceiling.

use sea_orm::entity::prelude::*;

/// Mentor model.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "mentors")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub email: String,
    pub year: i32,
    pub created_at: TimeDateTime,
}

/// Mentor model relations.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::team::Entity")]
    MentoredTeams,

    #[sea_orm(has_many = "super::senior_mentor_request::Entity")]
    SeniorMentorRequests,
}

impl Related<super::team::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MentoredTeams.def()
    }
}

impl Related<super::senior_mentor_request::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SeniorMentorRequests.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
