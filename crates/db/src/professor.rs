//! Faculty mentor.

use sea_orm::entity::prelude::*;

/// Maximum number of teams a professor may accept.
pub const MAX_MENTORED_TEAMS: i32 = 3;

/// Professor model.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "professors")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub email: String,
    pub department: String,
    pub accepted_team_count: i32,
    pub created_at: TimeDateTime,
}

/// Professor model relations.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::team::Entity")]
    MentoredTeams,

    #[sea_orm(has_many = "super::mentor_request::Entity")]
    MentorRequests,
}

impl Related<super::team::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MentoredTeams.def()
    }
}

impl Related<super::mentor_request::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MentorRequests.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
