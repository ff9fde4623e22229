use crate::forms::RoleForm;
use crate::models;
use crate::repository::{Page, PageRequest, Repository};
use crate::services::{Result, ServiceError};
use crate::views;
use serde_valid::Validate;
use std::sync::Arc;

pub struct RoleService {
    roles: Arc<dyn Repository<models::Role>>,
}

impl RoleService {
    pub fn new(roles: Arc<dyn Repository<models::Role>>) -> Self {
        Self { roles }
    }

    #[tracing::instrument(name = "Find role page.", skip(self))]
    pub async fn find_all_paged(&self, request: &PageRequest) -> Result<Page<views::Role>> {
        let page = self.roles.find_all(request).await?;
        Ok(page.map(views::Role::from))
    }

    #[tracing::instrument(name = "Find role.", skip(self))]
    pub async fn find_by_id(&self, id: i64) -> Result<views::Role> {
        self.roles
            .find_by_id(id)
            .await?
            .map(views::Role::from)
            .ok_or_else(|| ServiceError::not_found("Entity not found"))
    }

    #[tracing::instrument(name = "Insert role.", skip(self))]
    pub async fn insert(&self, form: RoleForm) -> Result<views::Role> {
        form.validate()?;

        let mut role = models::Role::default();
        form.update(&mut role);

        Ok(self.roles.insert(role).await?.into())
    }

    #[tracing::instrument(name = "Update role.", skip(self))]
    pub async fn update(&self, id: i64, form: RoleForm) -> Result<views::Role> {
        form.validate()?;

        let not_found = || ServiceError::not_found(format!("Id not found: {}", id));
        let mut role = self.roles.find_by_id(id).await?.ok_or_else(not_found)?;
        form.update(&mut role);

        self.roles
            .update(role)
            .await?
            .map(views::Role::from)
            .ok_or_else(not_found)
    }

    #[tracing::instrument(name = "Delete role.", skip(self))]
    pub async fn delete(&self, id: i64) -> Result<()> {
        let not_found = || ServiceError::not_found(format!("Id not found: {}", id));
        if !self.roles.exists_by_id(id).await? {
            return Err(not_found());
        }

        match self.roles.delete_by_id(id).await? {
            true => Ok(()),
            false => Err(not_found()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::memory::InMemoryRepository;

    #[tokio::test]
    async fn crud_round() {
        let repo = Arc::new(InMemoryRepository::<models::Role>::new());
        let service = RoleService::new(repo.clone());

        let role = service
            .insert(RoleForm {
                authority: "ROLE_OPERATOR".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(role.id, 1);

        let role = service
            .update(
                role.id,
                RoleForm {
                    authority: "ROLE_ADMIN".to_string(),
                },
            )
            .await
            .unwrap();
        assert_eq!(service.find_by_id(role.id).await.unwrap().authority, "ROLE_ADMIN");

        service.delete(role.id).await.unwrap();
        assert!(repo.get(role.id).is_none());
    }

    #[tokio::test]
    async fn delete_role_held_by_user_is_integrity_error() {
        let repo = Arc::new(InMemoryRepository::with_rows(vec![models::Role::new(
            1,
            "ROLE_ADMIN",
        )]));
        repo.mark_referenced(1);
        let service = RoleService::new(repo);

        let err = service.delete(1).await.unwrap_err();

        assert!(matches!(err, ServiceError::Integrity(message) if message == "Integrity violation"));
    }

    #[tokio::test]
    async fn page_beyond_last_is_empty() {
        let repo = Arc::new(InMemoryRepository::with_rows(vec![
            models::Role::new(1, "ROLE_OPERATOR"),
            models::Role::new(2, "ROLE_ADMIN"),
        ]));
        let service = RoleService::new(repo);

        let page = service
            .find_all_paged(&PageRequest::of(5, 10))
            .await
            .unwrap();

        assert!(page.empty);
        assert_eq!(page.total_elements, 2);
    }
}
