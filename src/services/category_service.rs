use crate::forms::CategoryForm;
use crate::models;
use crate::repository::{Page, PageRequest, Repository};
use crate::services::{Result, ServiceError};
use crate::views;
use serde_valid::Validate;
use std::sync::Arc;

pub struct CategoryService {
    categories: Arc<dyn Repository<models::Category>>,
}

impl CategoryService {
    pub fn new(categories: Arc<dyn Repository<models::Category>>) -> Self {
        Self { categories }
    }

    #[tracing::instrument(name = "Find category page.", skip(self))]
    pub async fn find_all_paged(&self, request: &PageRequest) -> Result<Page<views::Category>> {
        let page = self.categories.find_all(request).await?;
        Ok(page.map(views::Category::from))
    }

    #[tracing::instrument(name = "Find category.", skip(self))]
    pub async fn find_by_id(&self, id: i64) -> Result<views::Category> {
        self.categories
            .find_by_id(id)
            .await?
            .map(views::Category::from)
            .ok_or_else(|| ServiceError::not_found("Entity not found"))
    }

    #[tracing::instrument(name = "Insert category.", skip(self))]
    pub async fn insert(&self, form: CategoryForm) -> Result<views::Category> {
        form.validate()?;

        let mut category = models::Category::default();
        form.update(&mut category);

        let category = self.categories.insert(category).await?;
        Ok(category.into())
    }

    #[tracing::instrument(name = "Update category.", skip(self))]
    pub async fn update(&self, id: i64, form: CategoryForm) -> Result<views::Category> {
        form.validate()?;

        let not_found = || ServiceError::not_found(format!("Id not found: {}", id));
        let mut category = self
            .categories
            .find_by_id(id)
            .await?
            .ok_or_else(not_found)?;
        form.update(&mut category);

        self.categories
            .update(category)
            .await?
            .map(views::Category::from)
            .ok_or_else(not_found)
    }

    #[tracing::instrument(name = "Delete category.", skip(self))]
    pub async fn delete(&self, id: i64) -> Result<()> {
        let not_found = || ServiceError::not_found(format!("Id not found: {}", id));
        if !self.categories.exists_by_id(id).await? {
            return Err(not_found());
        }

        match self.categories.delete_by_id(id).await? {
            true => Ok(()),
            false => Err(not_found()),
        }
    }
}
