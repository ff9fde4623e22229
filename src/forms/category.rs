use crate::models;
use serde::{Deserialize, Serialize};
use serde_valid::Validate;

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct CategoryForm {
    #[validate(pattern = r"\S", message = "Required field")]
    #[validate(max_length = 60)]
    pub name: String,
}

impl CategoryForm {
    pub fn update(self, category: &mut models::Category) {
        category.name = self.name;
    }
}
