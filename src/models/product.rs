use crate::models::Category;
use crate::repository::Entity;
use chrono::{DateTime, Utc};

#[derive(Default, Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Product {
    pub id: i64, // 0 until the repository assigns one
    pub name: String,
    pub description: String,
    pub price: f64,
    pub img_url: String,
    pub date: DateTime<Utc>,
    // owning side of tb_product_category, one entry per category id
    #[sqlx(skip)]
    pub categories: Vec<Category>,
}

impl Product {
    pub fn category_ids(&self) -> Vec<i64> {
        self.categories.iter().map(|category| category.id).collect()
    }
}

impl Entity for Product {
    type Id = i64;

    fn id(&self) -> i64 {
        self.id
    }

    fn assign_id(&mut self, id: i64) {
        self.id = id;
    }
}
