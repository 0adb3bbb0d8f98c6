//! Hackathon team.
//!
//! A team is created by its leader and locks automatically once
//! the member count reaches [`MAX_MEMBERS`]. Ideas, meetings,
//! files, mentorship requests and the leaderboard entry are all
//! owned by the team and removed with it.

use sea_orm::entity::prelude::*;

/// Maximum number of students in a single team.
pub const MAX_MEMBERS: u64 = 4;

/// Team model.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "teams")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub is_locked: bool,
    pub leader_id: i64,
    pub professor_id: Option<i64>,
    pub senior_mentor_id: Option<i64>,
    pub created_at: TimeDateTime,
}

/// Team model relations.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::professor::Entity",
        from = "Column::ProfessorId",
        to = "super::professor::Column::Id"
    )]
    Professor,

    #[sea_orm(
        belongs_to = "super::mentor::Entity",
        from = "Column::SeniorMentorId",
        to = "super::mentor::Column::Id"
    )]
    SeniorMentor,

    #[sea_orm(has_many = "super::student::Entity")]
    Members,

    #[sea_orm(has_many = "super::idea::Entity")]
    Ideas,

    #[sea_orm(has_many = "super::meeting::Entity")]
    Meetings,

    #[sea_orm(has_many = "super::file::Entity")]
    Files,

    #[sea_orm(has_one = "super::leaderboard::Entity")]
    Leaderboard,
}

impl Related<super::professor::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Professor.def()
    }
}

impl Related<super::mentor::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SeniorMentor.def()
    }
}

impl Related<super::student::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Members.def()
    }
}

impl Related<super::leaderboard::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Leaderboard.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
