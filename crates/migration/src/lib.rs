pub use sea_orm_migration::prelude::*;
pub use sea_orm_migration::{cli, sea_orm};

mod m20230101_000001_create_students_table;
mod m20230101_000002_create_professors_table;
mod m20230101_000003_create_mentors_table;
mod m20230101_000004_create_teams_table;
mod m20230101_000005_create_mentor_requests_table;
mod m20230101_000006_create_senior_mentor_requests_table;
mod m20230101_000007_create_meetings_table;
mod m20230101_000008_create_ideas_table;
mod m20230101_000009_create_files_table;
mod m20230101_000010_create_leaderboards_table;

pub(crate) use m20230101_000001_create_students_table::Students;
pub(crate) use m20230101_000002_create_professors_table::Professors;
pub(crate) use m20230101_000003_create_mentors_table::Mentors;
pub(crate) use m20230101_000004_create_teams_table::Teams;
pub(crate) use m20230101_000008_create_ideas_table::Ideas;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20230101_000001_create_students_table::Migration),
            Box::new(m20230101_000002_create_professors_table::Migration),
            Box::new(m20230101_000003_create_mentors_table::Migration),
            Box::new(m20230101_000004_create_teams_table::Migration),
            Box::new(m20230101_000005_create_mentor_requests_table::Migration),
            Box::new(m20230101_000006_create_senior_mentor_requests_table::Migration),
            Box::new(m20230101_000007_create_meetings_table::Migration),
            Box::new(m20230101_000008_create_ideas_table::Migration),
            Box::new(m20230101_000009_create_files_table::Migration),
            Box::new(m20230101_000010_create_leaderboards_table::Migration),
        ]
    }
}
