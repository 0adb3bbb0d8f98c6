//! Senior mentor request.
//!
//! Same flow as [`mentor_request`](super::mentor_request), but
//! addressed to a senior student mentor instead of a professor.

use sea_orm::entity::prelude::*;

pub use super::mentor_request::RequestStatus;

/// Senior mentor request model.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "senior_mentor_requests")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub team_id: i64,
    pub mentor_id: i64,
    pub status: RequestStatus,
    pub message: Option<String>,
    pub created_at: TimeDateTime,
}

/// Senior mentor request model relations.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::team::Entity",
        from = "Column::TeamId",
        to = "super::team::Column::Id"
    )]
    Team,

    #[sea_orm(
        belongs_to = "super::mentor::Entity",
        from = "Column::MentorId",
        to = "super::mentor::Column::Id"
    )]
    Mentor,
}

impl Related<super::team::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Team.def()
    }
}

impl Related<super::mentor::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Mentor.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
