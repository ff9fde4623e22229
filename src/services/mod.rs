pub mod category_service;
pub mod error;
pub mod product_service;
pub mod role_service;
pub mod user_service;

pub use category_service::CategoryService;
pub use error::{Result, ServiceError};
pub use product_service::ProductService;
pub use role_service::RoleService;
pub use user_service::UserService;

use crate::repository::{Entity, Repository};

/// Loads the rows behind a list of reference ids. Every id has to resolve,
/// otherwise the whole request fails with NotFound.
pub(crate) async fn resolve_references<E>(
    repository: &dyn Repository<E>,
    ids: &[i64],
    kind: &str,
) -> Result<Vec<E>>
where
    E: Entity<Id = i64>,
{
    if ids.is_empty() {
        return Ok(vec![]);
    }

    let found = repository.find_all_by_id(ids).await?;
    if let Some(missing) = ids
        .iter()
        .find(|id| !found.iter().any(|row| row.id() == **id))
    {
        return Err(ServiceError::not_found(format!(
            "{} not found: {}",
            kind, missing
        )));
    }

    // keep the order the client sent
    let mut resolved = Vec::with_capacity(ids.len());
    for id in ids {
        if let Some(row) = found.iter().find(|row| row.id() == *id) {
            resolved.push(row.clone());
        }
    }
    Ok(resolved)
}
