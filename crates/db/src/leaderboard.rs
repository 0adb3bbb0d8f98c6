//! Team leaderboard entry.
//!
//! Exactly one row exists per team, created together with the team
//! itself. The total score is derived and must always equal the sum
//! of the three counters; use [`total_score`] when mutating them.

use sea_orm::entity::prelude::*;

/// Leaderboard model.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "leaderboards")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub team_id: i64,
    pub meetings_done: i32,
    pub tasks_done: i32,
    pub mentor_feedback_count: i32,
    pub total_score: i32,
    pub updated_at: TimeDateTime,
}

/// Leaderboard model relations.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::team::Entity",
        from = "Column::TeamId",
        to = "super::team::Column::Id"
    )]
    Team,
}

impl Related<super::team::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Team.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Recompute the derived total score from the individual counters.
pub fn total_score(meetings_done: i32, tasks_done: i32, mentor_feedback_count: i32) -> i32 {
    meetings_done + tasks_done + mentor_feedback_count
}
