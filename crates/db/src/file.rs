//! Uploaded file metadata.
//!
//! The file contents live in object storage under [`Model::storage_key`];
//! this row only records ownership and retrieval information. Every file
//! belongs to exactly one of a team or an idea.

use rand::{
    distributions::{Alphanumeric, DistString},
    thread_rng,
};
use sea_orm::entity::prelude::*;

/// Length of the randomized portion of a storage key.
pub const STORAGE_KEY_LENGTH: usize = 32;

/// File model.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "files")]
pub struct Model {
    /// Unique file identifier.
    #[sea_orm(primary_key)]
    pub id: i64,

    /// Object storage key, prefixed with the owning entity.
    pub storage_key: String,

    /// File name as provided by the uploader.
    pub original_filename: String,

    /// Lower-cased file extension.
    pub file_type: String,

    /// File size, in bytes.
    pub file_size: i64,

    /// Bucket-qualified storage path.
    pub storage_path: String,

    /// Last generated pre-signed download URL, if any.
    pub public_url: Option<String>,

    /// Owning team, if the file belongs to a team.
    pub team_id: Option<i64>,

    /// Owning idea, if the file belongs to an idea.
    pub idea_id: Option<i64>,

    /// Upload timestamp.
    pub created_at: TimeDateTime,
}

/// File model relations.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::team::Entity",
        from = "Column::TeamId",
        to = "super::team::Column::Id"
    )]
    Team,

    #[sea_orm(
        belongs_to = "super::idea::Entity",
        from = "Column::IdeaId",
        to = "super::idea::Column::Id"
    )]
    Idea,
}

impl Related<super::team::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Team.def()
    }
}

impl Related<super::idea::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Idea.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Generate a collision-free object storage key.
///
/// The key keeps the original file extension so that downloads
/// are served with a sensible name, while the randomized stem
/// prevents uploads from overwriting each other.
///
/// ## Example
///
/// ```
/// use db::file::generate_storage_key;
///
/// let key = generate_storage_key("team_1", "pdf");
/// assert!(key.starts_with("team_1/"));
/// assert!(key.ends_with(".pdf"));
/// ```
pub fn generate_storage_key(prefix: &str, extension: &str) -> String {
    let stem = Alphanumeric.sample_string(&mut thread_rng(), STORAGE_KEY_LENGTH);

    format!("{prefix}/{stem}.{extension}")
}
