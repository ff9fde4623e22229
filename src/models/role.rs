use crate::repository::Entity;

#[derive(Default, Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Role {
    pub id: i64,
    pub authority: String, // unique, e.g. ROLE_ADMIN
}

impl Role {
    pub fn new(id: i64, authority: &str) -> Self {
        Self {
            id,
            authority: authority.to_string(),
        }
    }
}

impl Entity for Role {
    type Id = i64;

    fn id(&self) -> i64 {
        self.id
    }

    fn assign_id(&mut self, id: i64) {
        self.id = id;
    }
}
