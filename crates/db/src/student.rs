//! Hackathon participant.
//!
//! A student may be a member of at most one team, and the team
//! they lead (if any) is discovered through the team's leader
//! reference rather than stored here.

use argon2::{
    password_hash::{Encoding, SaltString},
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
};
pub use argon2::password_hash::Error as PasswordHashError;
use rand::rngs::OsRng;
use sea_orm::entity::prelude::*;

/// Student model.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "students")]
pub struct Model {
    /// Unique student identifier.
    #[sea_orm(primary_key)]
    pub id: i64,

    /// Student's full name.
    pub name: String,

    /// Unique roll number.
    pub roll_no: String,

    /// Unique email address.
    pub email: String,

    /// Argon2 password hash.
    pub password_hash: String,

    /// Year of study.
    pub year: i32,

    /// Team that the student is a member of, if any.
    pub team_id: Option<i64>,

    /// Account creation timestamp.
    pub created_at: TimeDateTime,
}

/// Student model relations.
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

/// Hash the provided plain-text password for storage.
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);

    Ok(Argon2::default()
        .hash_password(password.as_bytes(), &salt)?
        .to_string())
}

/// Check the provided plain-text password against a stored hash.
pub fn verify_password(password: &str, password_hash: &str) -> bool {
    PasswordHash::parse(password_hash, Encoding::default())
        .map(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::{hash_password, verify_password};

    #[test]
    fn password_roundtrip() {
        let hash = hash_password("correct horse battery staple").unwrap();

        assert!(verify_password("correct horse battery staple", &hash));
        assert!(!verify_password("incorrect horse", &hash));
    }

    #[test]
    fn malformed_hash() {
        assert!(!verify_password("anything", "not-a-phc-string"));
    }
}
