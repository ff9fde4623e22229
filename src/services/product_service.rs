use crate::forms::ProductForm;
use crate::models;
use crate::repository::{Page, PageRequest, Repository};
use crate::services::{resolve_references, Result, ServiceError};
use crate::views;
use serde_valid::Validate;
use std::sync::Arc;

pub struct ProductService {
    products: Arc<dyn Repository<models::Product>>,
    categories: Arc<dyn Repository<models::Category>>,
}

impl ProductService {
    pub fn new(
        products: Arc<dyn Repository<models::Product>>,
        categories: Arc<dyn Repository<models::Category>>,
    ) -> Self {
        Self {
            products,
            categories,
        }
    }

    #[tracing::instrument(name = "Find product page.", skip(self))]
    pub async fn find_all_paged(&self, request: &PageRequest) -> Result<Page<views::Product>> {
        let page = self.products.find_all(request).await?;
        Ok(page.map(views::Product::from))
    }

    #[tracing::instrument(name = "Find product.", skip(self))]
    pub async fn find_by_id(&self, id: i64) -> Result<views::Product> {
        self.products
            .find_by_id(id)
            .await?
            .map(views::Product::from)
            .ok_or_else(|| ServiceError::not_found("Entity not found"))
    }

    #[tracing::instrument(name = "Insert product.", skip(self))]
    pub async fn insert(&self, form: ProductForm) -> Result<views::Product> {
        form.validate()?;

        let categories =
            resolve_references(self.categories.as_ref(), &form.category_ids(), "Category").await?;
        let mut product = models::Product {
            categories,
            ..Default::default()
        };
        form.update(&mut product);

        let product = self.products.insert(product).await?;
        Ok(product.into())
    }

    #[tracing::instrument(name = "Update product.", skip(self))]
    pub async fn update(&self, id: i64, form: ProductForm) -> Result<views::Product> {
        form.validate()?;

        let not_found = || ServiceError::not_found(format!("Id not found: {}", id));
        let mut product = self.products.find_by_id(id).await?.ok_or_else(not_found)?;

        product.categories =
            resolve_references(self.categories.as_ref(), &form.category_ids(), "Category").await?;
        form.update(&mut product);

        self.products
            .update(product)
            .await?
            .map(views::Product::from)
            .ok_or_else(not_found)
    }

    #[tracing::instrument(name = "Delete product.", skip(self))]
    pub async fn delete(&self, id: i64) -> Result<()> {
        let not_found = || ServiceError::not_found(format!("Id not found: {}", id));
        if !self.products.exists_by_id(id).await? {
            return Err(not_found());
        }

        match self.products.delete_by_id(id).await? {
            true => Ok(()),
            false => Err(not_found()),
        }
    }
}
