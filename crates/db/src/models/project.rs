//! Project entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use verkefni_core::types::{DbId, Timestamp};

/// A project row from the `projects` table.
///
/// `created` and `updated` are maintained by the database; every write
/// issued by the repository refreshes `updated`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub title: String,
    pub due: Option<Timestamp>,
    pub position: Option<i32>,
    pub completed: Option<bool>,
    pub created: Timestamp,
    pub updated: Timestamp,
}

/// Listing direction, keyed on `id`.
///
/// Kept as a closed enum so the direction can be spliced into SQL
/// without ever interpolating caller input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_sql(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}
