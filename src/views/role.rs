use crate::models;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Role {
    pub id: i64,
    pub authority: String,
}

impl From<models::Role> for Role {
    fn from(role: models::Role) -> Self {
        Self {
            id: role.id,
            authority: role.authority,
        }
    }
}
