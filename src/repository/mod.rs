//! Persistence capabilities shared by every entity type.
//!
//! Services only talk to these traits; `crate::db` provides the PostgreSQL
//! implementations.

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

#[cfg(test)]
pub mod memory;
mod page;

pub use page::{Direction, Page, PageRequest, Sort};

pub type Result<T> = std::result::Result<T, RepositoryError>;

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// Foreign key, unique or check constraint rejected the statement.
    #[error("Integrity violation: {0}")]
    Integrity(String),
    #[error("Unknown sort property: {0}")]
    InvalidSort(String),
    #[error("Database error: {0}")]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for RepositoryError {
    fn from(err: sqlx::Error) -> Self {
        use sqlx::error::ErrorKind;

        let kind = match &err {
            sqlx::Error::Database(db_err) => Some(db_err.kind()),
            _ => None,
        };

        match kind {
            Some(ErrorKind::ForeignKeyViolation)
            | Some(ErrorKind::UniqueViolation)
            | Some(ErrorKind::CheckViolation)
            | Some(ErrorKind::NotNullViolation) => Self::Integrity(err.to_string()),
            _ => Self::Database(err),
        }
    }
}

/// A persisted row with a database-assigned identity.
pub trait Entity: Clone + Debug + Send + Sync + 'static {
    type Id: Copy + Eq + Hash + Ord + Debug + Display + Send + Sync + 'static;

    fn id(&self) -> Self::Id;

    fn assign_id(&mut self, id: Self::Id);
}

#[async_trait]
pub trait Repository<E: Entity>: Send + Sync {
    async fn find_by_id(&self, id: E::Id) -> Result<Option<E>>;

    /// Rows for the ids that exist; missing ids are silently skipped.
    async fn find_all_by_id(&self, ids: &[E::Id]) -> Result<Vec<E>>;

    async fn find_all(&self, request: &PageRequest) -> Result<Page<E>>;

    async fn exists_by_id(&self, id: E::Id) -> Result<bool>;

    /// Persists a transient entity and returns it carrying its new id.
    async fn insert(&self, entity: E) -> Result<E>;

    /// Overwrites the stored row. `None` when no row has the entity's id.
    async fn update(&self, entity: E) -> Result<Option<E>>;

    /// `false` when nothing was deleted.
    async fn delete_by_id(&self, id: E::Id) -> Result<bool>;
}

#[async_trait]
pub trait UserRepository: Repository<crate::models::User> {
    async fn find_by_email(&self, email: &str) -> Result<Option<crate::models::User>>;
}
