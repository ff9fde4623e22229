use crate::forms::{unique_ids, Reference};
use crate::models;
use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use serde_valid::Validate;

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProductForm {
    #[validate(pattern = r"\S", message = "Required field")]
    #[validate(max_length = 60)]
    pub name: String,
    #[validate(pattern = r"\S", message = "Required field")]
    pub description: String,
    #[validate(minimum = 0.0, message = "Price must not be negative")]
    pub price: f64,
    #[serde(default)]
    #[validate(max_length = 2048)]
    pub img_url: String,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub categories: Vec<Reference>,
}

impl ProductForm {
    pub fn category_ids(&self) -> Vec<i64> {
        unique_ids(&self.categories)
    }

    /// Overwrites every scalar field; categories are resolved by the caller.
    /// `date` is cut to microseconds, the precision of `TIMESTAMPTZ`.
    pub fn update(self, product: &mut models::Product) {
        product.name = self.name;
        product.description = self.description;
        product.price = self.price;
        product.img_url = self.img_url;
        product.date = self.date.trunc_subsecs(6);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helpers::FieldMessage;

    fn form() -> ProductForm {
        serde_json::from_value(serde_json::json!({
            "name": "Phone",
            "description": "Good phone",
            "price": 800.0,
            "imgUrl": "https://img.com/img.png",
            "date": "2020-10-20T03:00:00Z",
            "categories": [{"id": 2, "name": "Electronics"}, {"id": 2}, {"id": 3}]
        }))
        .unwrap()
    }

    #[test]
    fn accepts_camel_case_payload_and_dedupes_categories() {
        let form = form();

        assert!(form.validate().is_ok());
        assert_eq!(form.img_url, "https://img.com/img.png");
        assert_eq!(form.category_ids(), vec![2, 3]);
    }

    #[test]
    fn rejects_blank_name_and_negative_price() {
        let mut form = form();
        form.name = "   ".to_string();
        form.price = -1.0;

        let errors = form.validate().unwrap_err();
        let fields: Vec<String> = FieldMessage::from_validation(&errors)
            .into_iter()
            .map(|m| m.field_name)
            .collect();

        assert!(fields.contains(&"name".to_string()));
        assert!(fields.contains(&"price".to_string()));
    }

    #[test]
    fn update_overwrites_scalars_only() {
        let mut product = models::Product {
            id: 7,
            categories: vec![models::Category::new(1, "Books")],
            ..Default::default()
        };

        form().update(&mut product);

        assert_eq!(product.id, 7);
        assert_eq!(product.name, "Phone");
        assert_eq!(product.price, 800.0);
        assert_eq!(product.category_ids(), vec![1]);
    }

    #[test]
    fn update_truncates_date_to_microseconds() {
        let mut form = form();
        form.date = "2020-10-20T03:00:00.123456789Z".parse().unwrap();
        let mut product = models::Product::default();

        form.update(&mut product);

        let expected: DateTime<Utc> = "2020-10-20T03:00:00.123456Z".parse().unwrap();
        assert_eq!(product.date, expected);
    }
}
