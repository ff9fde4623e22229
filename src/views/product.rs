use crate::models;
use crate::views;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub img_url: String,
    pub date: DateTime<Utc>,
    pub categories: Vec<views::Category>,
}

impl From<models::Product> for Product {
    fn from(product: models::Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            description: product.description,
            price: product.price,
            img_url: product.img_url,
            date: product.date,
            categories: product.categories.into_iter().map(Into::into).collect(),
        }
    }
}
