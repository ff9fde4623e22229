use crate::models;
use crate::views;
use serde::{Deserialize, Serialize};

/// Public projection of a user. The password hash has no counterpart here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub roles: Vec<views::Role>,
}

impl From<models::User> for User {
    fn from(user: models::User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            roles: user.roles.into_iter().map(Into::into).collect(),
        }
    }
}
