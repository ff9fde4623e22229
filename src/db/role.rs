use crate::db::{begin_read_only, order_by, query_error};
use crate::models;
use crate::repository::{Page, PageRequest, Repository, Result};
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::Instrument;

const SORTABLE: &[(&str, &str)] = &[("id", "id"), ("authority", "authority")];

#[derive(Clone, Debug)]
pub struct PgRoleRepository {
    pool: PgPool,
}

impl PgRoleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository<models::Role> for PgRoleRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<models::Role>> {
        tracing::info!("Fetch role {}", id);
        sqlx::query_as::<_, models::Role>("SELECT id, authority FROM tb_role WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(query_error("fetch role"))
    }

    async fn find_all_by_id(&self, ids: &[i64]) -> Result<Vec<models::Role>> {
        let query_span = tracing::info_span!("Fetch roles by ids.", ?ids);
        sqlx::query_as::<_, models::Role>(
            "SELECT id, authority FROM tb_role WHERE id = ANY($1) ORDER BY id",
        )
        .bind(ids.to_vec())
        .fetch_all(&self.pool)
        .instrument(query_span)
        .await
        .map_err(query_error("fetch roles"))
    }

    async fn find_all(&self, request: &PageRequest) -> Result<Page<models::Role>> {
        let sql = format!(
            "SELECT id, authority FROM tb_role {} LIMIT $1 OFFSET $2",
            order_by(request.sort.as_ref(), SORTABLE)?
        );
        let query_span =
            tracing::info_span!("Fetch role page.", page = request.page, size = request.size);

        async {
            let mut tx = begin_read_only(&self.pool).await?;
            let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tb_role")
                .fetch_one(&mut *tx)
                .await?;
            let content = sqlx::query_as::<_, models::Role>(&sql)
                .bind(request.limit())
                .bind(request.offset())
                .fetch_all(&mut *tx)
                .await?;
            tx.commit().await?;
            Ok::<_, sqlx::Error>(Page::new(content, request, total as u64))
        }
        .instrument(query_span)
        .await
        .map_err(query_error("fetch role page"))
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool> {
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM tb_role WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(query_error("check role existence"))
    }

    async fn insert(&self, mut role: models::Role) -> Result<models::Role> {
        let query_span = tracing::info_span!("Saving new role into the database");
        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO tb_role (authority) VALUES ($1) RETURNING id",
        )
        .bind(&role.authority)
        .fetch_one(&self.pool)
        .instrument(query_span)
        .await
        .map_err(query_error("insert role"))?;

        role.id = id;
        Ok(role)
    }

    async fn update(&self, role: models::Role) -> Result<Option<models::Role>> {
        let query_span = tracing::info_span!("Updating role", id = role.id);
        let result = sqlx::query("UPDATE tb_role SET authority = $2 WHERE id = $1")
            .bind(role.id)
            .bind(&role.authority)
            .execute(&self.pool)
            .instrument(query_span)
            .await
            .map_err(query_error("update role"))?;

        Ok((result.rows_affected() > 0).then_some(role))
    }

    #[tracing::instrument(name = "Delete role.", skip(self))]
    async fn delete_by_id(&self, id: i64) -> Result<bool> {
        sqlx::query("DELETE FROM tb_role WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map(|result| result.rows_affected() > 0)
            .map_err(query_error("delete role"))
    }
}
