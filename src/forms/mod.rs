pub mod category;
pub mod page;
pub mod product;
pub mod role;
pub mod user;

pub use category::CategoryForm;
pub use page::PageParams;
pub use product::ProductForm;
pub use role::RoleForm;
pub use user::{UserInsertForm, UserUpdateForm};

use serde::{Deserialize, Serialize};

/// Reference to a related row by id, e.g. `{"id": 2}` inside `categories`.
/// Any other keys the client sends along are ignored.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    pub id: i64,
}

/// Referenced ids in request order with duplicates dropped.
pub(crate) fn unique_ids(references: &[Reference]) -> Vec<i64> {
    let mut ids: Vec<i64> = Vec::with_capacity(references.len());
    for reference in references {
        if !ids.contains(&reference.id) {
            ids.push(reference.id);
        }
    }
    ids
}
