use std::sync::Arc;

use axum::{extract::State, Json};
use axum_derive_error::ErrorResponse;
use db::{leaderboard, team, DatabaseConnection, DbErr, EntityTrait, QueryOrder};
use derive_more::{Display, Error, From};

use super::LeaderboardEntryData;

/// Errors that may occur while listing the leaderboard.
#[derive(ErrorResponse, Display, From, Error)]
pub(super) enum LeaderboardError {
    /// Database-related error.
    DatabaseError(DbErr),
}

/// Full leaderboard handler, highest score first.
pub(super) async fn list(
    State(db): State<Arc<DatabaseConnection>>,
) -> Result<Json<Vec<LeaderboardEntryData>>, LeaderboardError> {
    let entries = leaderboard::Entity::find()
        .find_also_related(team::Entity)
        .order_by_desc(leaderboard::Column::TotalScore)
        .all(&*db)
        .await?;

    Ok(Json(
        entries
            .into_iter()
            .map(|(entry, team)| {
                let team_name = team.map(|team| team.name).unwrap_or_default();

                LeaderboardEntryData::new(entry, team_name)
            })
            .collect(),
    ))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::testing::{bearer, create_database, create_student, create_team, ResponseBodyExt};

    use assert_json::assert_json;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use common::config::Config;
    use db::{
        leaderboard, ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait,
        QueryFilter,
    };
    use tower::ServiceExt;

    async fn set_score(db: &DatabaseConnection, team_id: i64, tasks_done: i32) {
        let entry = leaderboard::Entity::find()
            .filter(leaderboard::Column::TeamId.eq(team_id))
            .one(db)
            .await
            .unwrap()
            .unwrap();

        let mut active: leaderboard::ActiveModel = entry.into();
        active.tasks_done = ActiveValue::Set(tasks_done);
        active.total_score = ActiveValue::Set(leaderboard::total_score(0, tasks_done, 0));
        active.update(db).await.unwrap();
    }

    #[tokio::test]
    async fn sorted_by_score() {
        let db = create_database().await;

        let first = create_student(&db, "First", "CS2021001", "first@example.com").await;
        let low = create_team(&db, "Low Scorers", first.id).await;

        let second = create_student(&db, "Second", "CS2021002", "second@example.com").await;
        let high = create_team(&db, "High Scorers", second.id).await;

        set_score(&db, low.id, 1).await;
        set_score(&db, high.id, 5).await;

        let response = crate::app_router(Arc::new(db), Arc::new(Config::for_tests()))
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/leaderboard")
                    .header("Authorization", bearer(first.id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        assert_json!(response.json().await, [
            {
                "team_name": "High Scorers",
                "total_score": 5,
            },
            {
                "team_name": "Low Scorers",
                "total_score": 1,
            }
        ]);
    }
}
