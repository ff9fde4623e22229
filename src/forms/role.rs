use crate::models;
use serde::{Deserialize, Serialize};
use serde_valid::Validate;

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct RoleForm {
    #[validate(pattern = r"\S", message = "Required field")]
    #[validate(max_length = 60)]
    pub authority: String,
}

impl RoleForm {
    pub fn update(self, role: &mut models::Role) {
        role.authority = self.authority;
    }
}
