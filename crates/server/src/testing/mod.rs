use std::error::Error;

use axum::async_trait;
use common::config::Config;
use db::{student, team, ActiveModelTrait, ActiveValue, Database, DatabaseConnection, EntityTrait};
use hyper::body::{self, Bytes, HttpBody};
use migration::MigratorTrait;
use serde::Serialize;

pub(crate) async fn create_database() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("unable to create test database");

    migration::Migrator::up(&db, None)
        .await
        .expect("unable to run migrations");

    db
}

/// Insert a student directly into the database.
///
/// All test students share the same password to keep login
/// tests readable.
pub(crate) async fn create_student(
    db: &DatabaseConnection,
    name: &str,
    roll_no: &str,
    email: &str,
) -> student::Model {
    student::Entity::insert(student::ActiveModel {
        name: ActiveValue::Set(name.to_string()),
        roll_no: ActiveValue::Set(roll_no.to_string()),
        email: ActiveValue::Set(email.to_string()),
        password_hash: ActiveValue::Set(
            student::hash_password("password123").expect("unable to hash password"),
        ),
        year: ActiveValue::Set(2),
        created_at: ActiveValue::Set(db::now()),
        ..Default::default()
    })
    .exec_with_returning(db)
    .await
    .expect("unable to create student")
}

/// Insert a team led by the provided student, along with its
/// leaderboard entry, and attach the leader as the first member.
pub(crate) async fn create_team(
    db: &DatabaseConnection,
    name: &str,
    leader_id: i64,
) -> team::Model {
    let team = team::Entity::insert(team::ActiveModel {
        name: ActiveValue::Set(name.to_string()),
        is_locked: ActiveValue::Set(false),
        leader_id: ActiveValue::Set(leader_id),
        created_at: ActiveValue::Set(db::now()),
        ..Default::default()
    })
    .exec_with_returning(db)
    .await
    .expect("unable to create team");

    db::leaderboard::Entity::insert(db::leaderboard::ActiveModel {
        team_id: ActiveValue::Set(team.id),
        meetings_done: ActiveValue::Set(0),
        tasks_done: ActiveValue::Set(0),
        mentor_feedback_count: ActiveValue::Set(0),
        total_score: ActiveValue::Set(0),
        updated_at: ActiveValue::Set(db::now()),
        ..Default::default()
    })
    .exec_without_returning(db)
    .await
    .expect("unable to create leaderboard entry");

    student::ActiveModel {
        id: ActiveValue::Unchanged(leader_id),
        team_id: ActiveValue::Set(Some(team.id)),
        ..Default::default()
    }
    .update(db)
    .await
    .expect("unable to attach leader to team");

    team
}

/// Insert a professor directly into the database.
pub(crate) async fn create_professor(
    db: &DatabaseConnection,
    name: &str,
    email: &str,
) -> db::professor::Model {
    db::professor::Entity::insert(db::professor::ActiveModel {
        name: ActiveValue::Set(name.to_string()),
        email: ActiveValue::Set(email.to_string()),
        department: ActiveValue::Set(String::from("Computer Science")),
        accepted_team_count: ActiveValue::Set(0),
        created_at: ActiveValue::Set(db::now()),
        ..Default::default()
    })
    .exec_with_returning(db)
    .await
    .expect("unable to create professor")
}

/// Insert a senior mentor directly into the database.
pub(crate) async fn create_mentor(
    db: &DatabaseConnection,
    name: &str,
    email: &str,
) -> db::mentor::Model {
    db::mentor::Entity::insert(db::mentor::ActiveModel {
        name: ActiveValue::Set(name.to_string()),
        email: ActiveValue::Set(email.to_string()),
        year: ActiveValue::Set(4),
        created_at: ActiveValue::Set(db::now()),
        ..Default::default()
    })
    .exec_with_returning(db)
    .await
    .expect("unable to create mentor")
}

/// Insert a project idea for the provided team.
pub(crate) async fn create_idea(
    db: &DatabaseConnection,
    title: &str,
    team_id: i64,
) -> db::idea::Model {
    db::idea::Entity::insert(db::idea::ActiveModel {
        title: ActiveValue::Set(title.to_string()),
        description: ActiveValue::Set(String::from("An idea description")),
        team_id: ActiveValue::Set(team_id),
        created_at: ActiveValue::Set(db::now()),
        ..Default::default()
    })
    .exec_with_returning(db)
    .await
    .expect("unable to create idea")
}

/// `Authorization` header value for the provided student,
/// signed with the test configuration secret.
pub(crate) fn bearer(student_id: i64) -> String {
    let token = crate::auth::issue_token(student_id, &Config::for_tests().auth)
        .expect("unable to issue token");

    format!("Bearer {token}")
}

pub(crate) trait RequestBodyExt: Sized {
    fn from_json<B: Serialize>(val: B) -> Self;
}

impl<T> RequestBodyExt for T
where
    T: HttpBody + From<Vec<u8>>,
{
    fn from_json<B: Serialize>(val: B) -> Self {
        T::from(serde_json::to_vec(&val).expect("unable to serialize"))
    }
}

#[async_trait(?Send)]
pub(crate) trait ResponseBodyExt {
    async fn bytes(self) -> Bytes;

    async fn text(self) -> String;

    async fn json(self) -> serde_json::Value;

    /// Extract the message from a JSON error body.
    async fn error(self) -> String;
}

#[async_trait(?Send)]
impl<T> ResponseBodyExt for T
where
    T: HttpBody,
    T::Error: Error,
{
    async fn bytes(self) -> Bytes {
        body::to_bytes(self)
            .await
            .expect("unable to convert to bytes")
    }

    async fn text(self) -> String {
        String::from_utf8(self.bytes().await.to_vec()).expect("unable to convert to text")
    }

    async fn json(self) -> serde_json::Value {
        serde_json::from_slice(&self.bytes().await).expect("unable to convert to json")
    }

    async fn error(self) -> String {
        self.json().await["error"]
            .as_str()
            .expect("missing error field")
            .to_string()
    }
}
