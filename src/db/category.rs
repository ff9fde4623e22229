use crate::db::{begin_read_only, order_by, query_error};
use crate::models;
use crate::repository::{Page, PageRequest, Repository, Result};
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::Instrument;

const SORTABLE: &[(&str, &str)] = &[("id", "id"), ("name", "name")];

#[derive(Clone, Debug)]
pub struct PgCategoryRepository {
    pool: PgPool,
}

impl PgCategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository<models::Category> for PgCategoryRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<models::Category>> {
        tracing::info!("Fetch category {}", id);
        sqlx::query_as::<_, models::Category>("SELECT id, name FROM tb_category WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(query_error("fetch category"))
    }

    async fn find_all_by_id(&self, ids: &[i64]) -> Result<Vec<models::Category>> {
        let query_span = tracing::info_span!("Fetch categories by ids.", ?ids);
        sqlx::query_as::<_, models::Category>(
            "SELECT id, name FROM tb_category WHERE id = ANY($1) ORDER BY id",
        )
        .bind(ids.to_vec())
        .fetch_all(&self.pool)
        .instrument(query_span)
        .await
        .map_err(query_error("fetch categories"))
    }

    async fn find_all(&self, request: &PageRequest) -> Result<Page<models::Category>> {
        let order_by = order_by(request.sort.as_ref(), SORTABLE)?;
        let sql = format!(
            "SELECT id, name FROM tb_category {} LIMIT $1 OFFSET $2",
            order_by
        );
        let query_span = tracing::info_span!("Fetch category page.", page = request.page, size = request.size);

        async {
            let mut tx = begin_read_only(&self.pool).await?;
            let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tb_category")
                .fetch_one(&mut *tx)
                .await?;
            let content = sqlx::query_as::<_, models::Category>(&sql)
                .bind(request.limit())
                .bind(request.offset())
                .fetch_all(&mut *tx)
                .await?;
            tx.commit().await?;
            Ok::<_, sqlx::Error>(Page::new(content, request, total as u64))
        }
        .instrument(query_span)
        .await
        .map_err(query_error("fetch category page"))
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool> {
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM tb_category WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(query_error("check category existence"))
    }

    async fn insert(&self, mut category: models::Category) -> Result<models::Category> {
        let query_span = tracing::info_span!("Saving new category into the database");
        category.id =
            sqlx::query_scalar::<_, i64>("INSERT INTO tb_category (name) VALUES ($1) RETURNING id")
                .bind(&category.name)
                .fetch_one(&self.pool)
                .instrument(query_span)
                .await
                .map_err(query_error("insert category"))?;

        tracing::info!("Category {} have been saved", category.id);
        Ok(category)
    }

    async fn update(&self, category: models::Category) -> Result<Option<models::Category>> {
        let query_span = tracing::info_span!("Updating category", id = category.id);
        sqlx::query("UPDATE tb_category SET name = $2 WHERE id = $1")
            .bind(category.id)
            .bind(&category.name)
            .execute(&self.pool)
            .instrument(query_span)
            .await
            .map(|result| match result.rows_affected() {
                0 => None,
                _ => Some(category.clone()),
            })
            .map_err(query_error("update category"))
    }

    #[tracing::instrument(name = "Delete category.", skip(self))]
    async fn delete_by_id(&self, id: i64) -> Result<bool> {
        sqlx::query("DELETE FROM tb_category WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map(|result| result.rows_affected() > 0)
            .map_err(query_error("delete category"))
    }
}
