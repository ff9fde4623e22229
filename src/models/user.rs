use crate::models::Role;
use crate::repository::Entity;

#[derive(Default, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Argon2 PHC string, never the raw password.
    pub password: String,
    #[sqlx(skip)]
    pub roles: Vec<Role>,
}

impl User {
    pub fn role_ids(&self) -> Vec<i64> {
        self.roles.iter().map(|role| role.id).collect()
    }
}

fn mask_string(s: &str) -> String {
    match s.is_empty() {
        true => "".to_string(),
        false => s.chars().take(4).collect::<String>() + "****",
    }
}

impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .field("password", &mask_string(&self.password))
            .field("roles", &self.roles)
            .finish()
    }
}

impl Entity for User {
    type Id = i64;

    fn id(&self) -> i64 {
        self.id
    }

    fn assign_id(&mut self, id: i64) {
        self.id = id;
    }
}
