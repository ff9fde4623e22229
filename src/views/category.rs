use crate::models;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

impl From<models::Category> for Category {
    fn from(category: models::Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
        }
    }
}
