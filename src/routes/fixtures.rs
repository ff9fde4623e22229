//! In-memory application state shared by the handler tests.

use crate::configuration::PaginationSettings;
use crate::helpers::password;
use crate::models;
use crate::repository::memory::InMemoryRepository;
use crate::services::{CategoryService, ProductService, RoleService, UserService};
use actix_web::web;
use chrono::{TimeZone, Utc};
use std::sync::Arc;

/// Builds the service under test: error handling middleware, the fixture's
/// services and every route.
macro_rules! init_app {
    ($fixture:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .wrap(crate::middleware::error_handlers())
                .configure(|cfg| $fixture.app_data(cfg))
                .configure(crate::startup::configure),
        )
        .await
    };
}

pub struct Fixture {
    pub products: Arc<InMemoryRepository<models::Product>>,
    pub categories: Arc<InMemoryRepository<models::Category>>,
    pub roles: Arc<InMemoryRepository<models::Role>>,
    pub users: Arc<InMemoryRepository<models::User>>,
}

pub const PRODUCT_COUNT: i64 = 25;

impl Fixture {
    /// Three categories, 25 products, two roles and two users. Categories 1-3
    /// and both roles are referenced by other rows.
    pub fn seeded() -> Self {
        let categories = vec![
            models::Category::new(1, "Books"),
            models::Category::new(2, "Electronics"),
            models::Category::new(3, "Computers"),
        ];
        let products = (1..=PRODUCT_COUNT)
            .map(|id| models::Product {
                id,
                name: format!("Product {}", id),
                description: "Lorem ipsum dolor sit amet".to_string(),
                price: 90.5 + id as f64,
                img_url: format!("https://img.com/{}-big.jpg", id),
                date: Utc.with_ymd_and_hms(2020, 7, 14, 10, 0, 0).unwrap(),
                categories: vec![categories[(id % 3) as usize].clone()],
            })
            .collect();
        let roles = vec![
            models::Role::new(1, "ROLE_OPERATOR"),
            models::Role::new(2, "ROLE_ADMIN"),
        ];
        let users = vec![
            models::User {
                id: 1,
                first_name: "Bob".to_string(),
                last_name: "Brown".to_string(),
                email: "bob@gmail.com".to_string(),
                password: password::hash("123456").unwrap(),
                roles: vec![roles[0].clone()],
            },
            models::User {
                id: 2,
                first_name: "Alice".to_string(),
                last_name: "Green".to_string(),
                email: "alice@gmail.com".to_string(),
                password: password::hash("123456").unwrap(),
                roles: roles.clone(),
            },
        ];

        let fixture = Self {
            products: Arc::new(InMemoryRepository::with_rows(products)),
            categories: Arc::new(InMemoryRepository::with_rows(categories)),
            roles: Arc::new(InMemoryRepository::with_rows(roles)),
            users: Arc::new(InMemoryRepository::with_rows(users)),
        };
        for id in 1..=3 {
            fixture.categories.mark_referenced(id);
        }
        for id in 1..=2 {
            fixture.roles.mark_referenced(id);
        }
        fixture
    }

    pub fn app_data(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(web::Data::new(PaginationSettings::default()))
            .app_data(web::Data::new(ProductService::new(
                self.products.clone(),
                self.categories.clone(),
            )))
            .app_data(web::Data::new(CategoryService::new(self.categories.clone())))
            .app_data(web::Data::new(RoleService::new(self.roles.clone())))
            .app_data(web::Data::new(UserService::new(
                self.users.clone(),
                self.roles.clone(),
            )));
    }
}
