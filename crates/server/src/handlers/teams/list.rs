use std::{collections::HashMap, sync::Arc};

use axum::{extract::State, Json};
use axum_derive_error::ErrorResponse;
use db::{
    student, team, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QuerySelect,
};
use derive_more::{Display, Error, From};

use super::TeamData;

/// Errors that may occur while listing teams.
#[derive(ErrorResponse, Display, From, Error)]
pub(super) enum ListTeamsError {
    /// Database-related error.
    DatabaseError(DbErr),
}

/// Team listing handler.
pub(super) async fn list(
    State(db): State<Arc<DatabaseConnection>>,
) -> Result<Json<Vec<TeamData>>, ListTeamsError> {
    let teams = team::Entity::find().all(&*db).await?;

    let member_counts: HashMap<i64, i64> = student::Entity::find()
        .select_only()
        .column(student::Column::TeamId)
        .column_as(student::Column::Id.count(), "member_count")
        .filter(student::Column::TeamId.is_not_null())
        .group_by(student::Column::TeamId)
        .into_tuple::<(i64, i64)>()
        .all(&*db)
        .await?
        .into_iter()
        .collect();

    Ok(Json(
        teams
            .into_iter()
            .map(|team| {
                let member_count = member_counts.get(&team.id).copied().unwrap_or(0) as u64;

                TeamData::new(team, member_count)
            })
            .collect(),
    ))
}
