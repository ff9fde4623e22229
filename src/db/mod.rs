//! PostgreSQL implementations of the repository traits.

pub mod category;
pub mod product;
pub mod role;
pub mod user;

pub use category::PgCategoryRepository;
pub use product::PgProductRepository;
pub use role::PgRoleRepository;
pub use user::PgUserRepository;

use crate::repository::{RepositoryError, Sort};
use sqlx::{PgPool, Postgres, Transaction};

/// Opens a transaction that rejects writes. Used for reads spanning
/// several statements so totals, rows and relations agree.
pub(crate) async fn begin_read_only(
    pool: &PgPool,
) -> Result<Transaction<'static, Postgres>, sqlx::Error> {
    let mut tx = pool.begin().await?;
    sqlx::query("SET TRANSACTION READ ONLY")
        .execute(&mut *tx)
        .await?;
    Ok(tx)
}

/// `ORDER BY` clause for a client-supplied sort. Only properties listed in
/// `columns` (property, column) reach the SQL text; id breaks ties.
pub(crate) fn order_by(
    sort: Option<&Sort>,
    columns: &[(&str, &str)],
) -> Result<String, RepositoryError> {
    let sort = match sort {
        None => return Ok("ORDER BY id ASC".to_string()),
        Some(sort) => sort,
    };

    let column = columns
        .iter()
        .find(|(property, _)| *property == sort.property)
        .map(|(_, column)| *column)
        .ok_or_else(|| RepositoryError::InvalidSort(sort.property.clone()))?;

    if column == "id" {
        return Ok(format!("ORDER BY id {}", sort.direction.as_sql()));
    }
    Ok(format!(
        "ORDER BY {} {}, id ASC",
        column,
        sort.direction.as_sql()
    ))
}

/// Converts and logs a failed query. Constraint violations are expected
/// outcomes and only logged at warn level.
pub(crate) fn query_error(action: &'static str) -> impl Fn(sqlx::Error) -> RepositoryError {
    move |err| {
        let err = RepositoryError::from(err);
        match &err {
            RepositoryError::Database(e) => {
                tracing::error!("Failed to {}, error: {:?}", action, e)
            }
            other => tracing::warn!("Could not {}: {}", action, other),
        }
        err
    }
}
