use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use axum_derive_error::ErrorResponse;
use db::{
    file, idea, student, team, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
};
use derive_more::{Display, Error, From};

use super::FileData;
use crate::auth::AuthenticatedStudentId;

/// Errors that may occur while listing uploaded files.
#[derive(ErrorResponse, Display, From, Error)]
pub(super) enum ListFilesError {
    /// Database-related error.
    DatabaseError(DbErr),

    #[status(StatusCode::NOT_FOUND)]
    #[display(fmt = "Student not found")]
    StudentNotFound,

    #[status(StatusCode::NOT_FOUND)]
    #[display(fmt = "Team not found")]
    TeamNotFound,

    #[status(StatusCode::NOT_FOUND)]
    #[display(fmt = "Idea not found")]
    IdeaNotFound,

    #[status(StatusCode::FORBIDDEN)]
    #[display(fmt = "Access denied: You are not in this team")]
    AccessDenied,
}

async fn require_membership(
    db: &DatabaseConnection,
    student_id: i64,
    team_id: i64,
) -> Result<(), ListFilesError> {
    let student = student::Entity::find_by_id(student_id)
        .one(db)
        .await?
        .ok_or(ListFilesError::StudentNotFound)?;

    if student.team_id != Some(team_id) {
        return Err(ListFilesError::AccessDenied);
    }

    Ok(())
}

/// Team file listing handler.
pub(super) async fn team(
    State(db): State<Arc<DatabaseConnection>>,
    Extension(student_id): Extension<AuthenticatedStudentId>,
    Path(team_id): Path<i64>,
) -> Result<Json<Vec<FileData>>, ListFilesError> {
    let team = team::Entity::find_by_id(team_id)
        .one(&*db)
        .await?
        .ok_or(ListFilesError::TeamNotFound)?;

    require_membership(&db, student_id.id(), team.id).await?;

    let files = file::Entity::find()
        .filter(file::Column::TeamId.eq(team.id))
        .all(&*db)
        .await?;

    Ok(Json(files.into_iter().map(FileData::from).collect()))
}

/// Idea file listing handler.
pub(super) async fn idea(
    State(db): State<Arc<DatabaseConnection>>,
    Extension(student_id): Extension<AuthenticatedStudentId>,
    Path(idea_id): Path<i64>,
) -> Result<Json<Vec<FileData>>, ListFilesError> {
    let idea = idea::Entity::find_by_id(idea_id)
        .one(&*db)
        .await?
        .ok_or(ListFilesError::IdeaNotFound)?;

    require_membership(&db, student_id.id(), idea.team_id).await?;

    let files = file::Entity::find()
        .filter(file::Column::IdeaId.eq(idea.id))
        .all(&*db)
        .await?;

    Ok(Json(files.into_iter().map(FileData::from).collect()))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::testing::{
        bearer, create_database, create_idea, create_student, create_team, ResponseBodyExt,
    };

    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use common::config::Config;
    use db::{file, ActiveValue, DatabaseConnection, EntityTrait};
    use tower::{Service, ServiceExt};

    async fn create_file(db: &DatabaseConnection, team_id: Option<i64>, idea_id: Option<i64>) {
        file::Entity::insert(file::ActiveModel {
            storage_key: ActiveValue::Set(String::from("team_1/abcdef.pdf")),
            original_filename: ActiveValue::Set(String::from("pitch.pdf")),
            file_type: ActiveValue::Set(String::from("pdf")),
            file_size: ActiveValue::Set(8),
            storage_path: ActiveValue::Set(String::from("files/team_1/abcdef.pdf")),
            public_url: ActiveValue::Set(Some(String::from("http://localhost:9000/presigned"))),
            team_id: ActiveValue::Set(team_id),
            idea_id: ActiveValue::Set(idea_id),
            created_at: ActiveValue::Set(db::now()),
            ..Default::default()
        })
        .exec_without_returning(db)
        .await
        .expect("unable to create file");
    }

    #[tokio::test]
    async fn team_and_idea_files_are_separate() {
        let db = create_database().await;

        let leader = create_student(&db, "Leader", "CS2021001", "leader@example.com").await;
        let team = create_team(&db, "Rustaceans", leader.id).await;
        let idea = create_idea(&db, "Plagiarism detector", team.id).await;

        create_file(&db, Some(team.id), None).await;
        create_file(&db, None, Some(idea.id)).await;
        create_file(&db, None, Some(idea.id)).await;

        let mut service = crate::app_router(Arc::new(db), Arc::new(Config::for_tests()));

        let response = service
            .call(
                Request::builder()
                    .method("GET")
                    .uri(format!("/files/team/{}", team.id))
                    .header("Authorization", bearer(leader.id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.json().await.as_array().unwrap().len(), 1);

        let response = service
            .call(
                Request::builder()
                    .method("GET")
                    .uri(format!("/files/idea/{}", idea.id))
                    .header("Authorization", bearer(leader.id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.json().await.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn outsider_is_rejected() {
        let db = create_database().await;

        let leader = create_student(&db, "Leader", "CS2021001", "leader@example.com").await;
        let team = create_team(&db, "Rustaceans", leader.id).await;

        let outsider = create_student(&db, "Outsider", "CS2021002", "outsider@example.com").await;

        let response = crate::app_router(Arc::new(db), Arc::new(Config::for_tests()))
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri(format!("/files/team/{}", team.id))
                    .header("Authorization", bearer(outsider.id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn unknown_idea() {
        let db = create_database().await;

        let student = create_student(&db, "Student", "CS2021001", "student@example.com").await;

        let response = crate::app_router(Arc::new(db), Arc::new(Config::for_tests()))
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/files/idea/404")
                    .header("Authorization", bearer(student.id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(response.error().await, "Idea not found");
    }
}
