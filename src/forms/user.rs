use crate::forms::{unique_ids, Reference};
use crate::models;
use serde::{Deserialize, Serialize};
use serde_valid::Validate;

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdateForm {
    #[validate(pattern = r"\S", message = "Required field")]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[validate(pattern = r"^[^@\s]+@[^@\s]+\.[^@\s]+$", message = "Please send a valid email address")]
    pub email: String,
    #[serde(default)]
    pub roles: Vec<Reference>,
}

impl UserUpdateForm {
    pub fn role_ids(&self) -> Vec<i64> {
        unique_ids(&self.roles)
    }

    /// Overwrites names and email. The password hash is left untouched.
    pub fn update(self, user: &mut models::User) {
        user.first_name = self.first_name;
        user.last_name = self.last_name;
        user.email = self.email;
    }
}

/// Payload for creating a user: the public fields plus the raw password.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UserInsertForm {
    #[validate(pattern = r"\S", message = "Required field")]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[validate(pattern = r"^[^@\s]+@[^@\s]+\.[^@\s]+$", message = "Please send a valid email address")]
    pub email: String,
    #[validate(min_length = 6, message = "Password must have at least 6 characters")]
    pub password: String,
    #[serde(default)]
    pub roles: Vec<Reference>,
}

impl UserInsertForm {
    /// Splits off the raw password, leaving the fields shared with updates.
    pub fn into_parts(self) -> (UserUpdateForm, String) {
        let form = UserUpdateForm {
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            roles: self.roles,
        };
        (form, self.password)
    }
}
