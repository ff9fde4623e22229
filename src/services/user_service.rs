use crate::forms::{UserInsertForm, UserUpdateForm};
use crate::helpers::password;
use crate::models;
use crate::repository::{Page, PageRequest, Repository, UserRepository};
use crate::services::{resolve_references, Result, ServiceError};
use crate::views;
use serde_valid::Validate;
use std::sync::Arc;

pub struct UserService {
    users: Arc<dyn UserRepository>,
    roles: Arc<dyn Repository<models::Role>>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserRepository>, roles: Arc<dyn Repository<models::Role>>) -> Self {
        Self { users, roles }
    }

    #[tracing::instrument(name = "Find user page.", skip(self))]
    pub async fn find_all_paged(&self, request: &PageRequest) -> Result<Page<views::User>> {
        let page = self.users.find_all(request).await?;
        Ok(page.map(views::User::from))
    }

    #[tracing::instrument(name = "Find user.", skip(self))]
    pub async fn find_by_id(&self, id: i64) -> Result<views::User> {
        self.users
            .find_by_id(id)
            .await?
            .map(views::User::from)
            .ok_or_else(|| ServiceError::not_found("Entity not found"))
    }

    #[tracing::instrument(name = "Insert user.", skip(self, form), fields(email = %form.email))]
    pub async fn insert(&self, form: UserInsertForm) -> Result<views::User> {
        form.validate()?;
        self.ensure_email_free(&form.email, None).await?;

        let (form, raw_password) = form.into_parts();
        let roles = resolve_references(self.roles.as_ref(), &form.role_ids(), "Role").await?;

        let mut user = models::User {
            password: hash_password(raw_password).await?,
            roles,
            ..Default::default()
        };
        form.update(&mut user);

        Ok(self.users.insert(user).await?.into())
    }

    #[tracing::instrument(name = "Update user.", skip(self, form), fields(email = %form.email))]
    pub async fn update(&self, id: i64, form: UserUpdateForm) -> Result<views::User> {
        form.validate()?;

        let not_found = || ServiceError::not_found(format!("Id not found: {}", id));
        let mut user = self.users.find_by_id(id).await?.ok_or_else(not_found)?;
        self.ensure_email_free(&form.email, Some(id)).await?;

        user.roles = resolve_references(self.roles.as_ref(), &form.role_ids(), "Role").await?;
        form.update(&mut user);

        self.users
            .update(user)
            .await?
            .map(views::User::from)
            .ok_or_else(not_found)
    }

    #[tracing::instrument(name = "Delete user.", skip(self))]
    pub async fn delete(&self, id: i64) -> Result<()> {
        let not_found = || ServiceError::not_found(format!("Id not found: {}", id));
        if !self.users.exists_by_id(id).await? {
            return Err(not_found());
        }

        match self.users.delete_by_id(id).await? {
            true => Ok(()),
            false => Err(not_found()),
        }
    }

    /// Email must not belong to any user other than `owner`.
    async fn ensure_email_free(&self, email: &str, owner: Option<i64>) -> Result<()> {
        match self.users.find_by_email(email).await? {
            Some(existing) if Some(existing.id) != owner => {
                Err(ServiceError::invalid_field("email", "Email already exists"))
            }
            _ => Ok(()),
        }
    }
}

async fn hash_password(raw: String) -> Result<String> {
    tokio::task::spawn_blocking(move || password::hash(&raw))
        .await
        .map_err(|err| {
            tracing::error!("Password hashing task failed: {:?}", err);
            ServiceError::Internal("Internal server error".to_string())
        })?
        .map_err(|err| {
            tracing::error!("Failed to hash password: {:?}", err);
            ServiceError::Internal("Internal server error".to_string())
        })
}
