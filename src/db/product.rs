use crate::db::{begin_read_only, order_by, query_error};
use crate::models;
use crate::repository::{Page, PageRequest, Repository, Result};
use async_trait::async_trait;
use sqlx::{PgConnection, PgPool};
use std::collections::HashMap;
use tracing::Instrument;

const SORTABLE: &[(&str, &str)] = &[
    ("id", "id"),
    ("name", "name"),
    ("price", "price"),
    ("date", "date"),
];

const COLUMNS: &str = "id, name, description, price, img_url, date";

#[derive(sqlx::FromRow)]
struct CategoryLink {
    product_id: i64,
    id: i64,
    name: String,
}

#[derive(Clone, Debug)]
pub struct PgProductRepository {
    pool: PgPool,
}

impl PgProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Fills `categories` of every product with one query over the join table.
async fn attach_categories(
    conn: &mut PgConnection,
    products: &mut [models::Product],
) -> std::result::Result<(), sqlx::Error> {
    if products.is_empty() {
        return Ok(());
    }
    let ids: Vec<i64> = products.iter().map(|p| p.id).collect();
    let links = sqlx::query_as::<_, CategoryLink>(
        r#"
        SELECT pc.product_id, c.id, c.name
        FROM tb_product_category pc
        JOIN tb_category c ON c.id = pc.category_id
        WHERE pc.product_id = ANY($1)
        ORDER BY c.id
        "#,
    )
    .bind(ids)
    .fetch_all(&mut *conn)
    .await?;

    let mut by_product: HashMap<i64, Vec<models::Category>> = HashMap::new();
    for link in links {
        by_product
            .entry(link.product_id)
            .or_default()
            .push(models::Category {
                id: link.id,
                name: link.name,
            });
    }
    for product in products.iter_mut() {
        product.categories = by_product.remove(&product.id).unwrap_or_default();
    }
    Ok(())
}

async fn link_categories(
    conn: &mut PgConnection,
    product: &models::Product,
) -> std::result::Result<(), sqlx::Error> {
    if product.categories.is_empty() {
        return Ok(());
    }
    sqlx::query(
        r#"
        INSERT INTO tb_product_category (product_id, category_id)
        SELECT $1, UNNEST($2::bigint[])
        ON CONFLICT DO NOTHING
        "#,
    )
    .bind(product.id)
    .bind(product.category_ids())
    .execute(&mut *conn)
    .await?;
    Ok(())
}

#[async_trait]
impl Repository<models::Product> for PgProductRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<models::Product>> {
        let query_span = tracing::info_span!("Fetch product by id.", id);
        async {
            let mut tx = begin_read_only(&self.pool).await?;
            let product = sqlx::query_as::<_, models::Product>(&format!(
                "SELECT {} FROM tb_product WHERE id = $1",
                COLUMNS
            ))
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;

            let product = match product {
                Some(mut product) => {
                    attach_categories(&mut *tx, std::slice::from_mut(&mut product)).await?;
                    Some(product)
                }
                None => None,
            };
            tx.commit().await?;
            Ok::<_, sqlx::Error>(product)
        }
        .instrument(query_span)
        .await
        .map_err(query_error("fetch product"))
    }

    async fn find_all_by_id(&self, ids: &[i64]) -> Result<Vec<models::Product>> {
        let query_span = tracing::info_span!("Fetch products by ids.", ?ids);
        async {
            let mut tx = begin_read_only(&self.pool).await?;
            let mut products = sqlx::query_as::<_, models::Product>(&format!(
                "SELECT {} FROM tb_product WHERE id = ANY($1) ORDER BY id",
                COLUMNS
            ))
            .bind(ids.to_vec())
            .fetch_all(&mut *tx)
            .await?;
            attach_categories(&mut *tx, &mut products).await?;
            tx.commit().await?;
            Ok::<_, sqlx::Error>(products)
        }
        .instrument(query_span)
        .await
        .map_err(query_error("fetch products"))
    }

    async fn find_all(&self, request: &PageRequest) -> Result<Page<models::Product>> {
        let sql = format!(
            "SELECT {} FROM tb_product {} LIMIT $1 OFFSET $2",
            COLUMNS,
            order_by(request.sort.as_ref(), SORTABLE)?
        );
        let query_span =
            tracing::info_span!("Fetch product page.", page = request.page, size = request.size);

        async {
            let mut tx = begin_read_only(&self.pool).await?;
            let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tb_product")
                .fetch_one(&mut *tx)
                .await?;
            let mut content = sqlx::query_as::<_, models::Product>(&sql)
                .bind(request.limit())
                .bind(request.offset())
                .fetch_all(&mut *tx)
                .await?;
            attach_categories(&mut *tx, &mut content).await?;
            tx.commit().await?;
            Ok::<_, sqlx::Error>(Page::new(content, request, total as u64))
        }
        .instrument(query_span)
        .await
        .map_err(query_error("fetch product page"))
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool> {
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM tb_product WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(query_error("check product existence"))
    }

    async fn insert(&self, mut product: models::Product) -> Result<models::Product> {
        let query_span = tracing::info_span!("Saving new product into the database");
        async {
            let mut tx = self.pool.begin().await?;
            product.id = sqlx::query_scalar::<_, i64>(
                r#"
                INSERT INTO tb_product (name, description, price, img_url, date)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING id
                "#,
            )
            .bind(&product.name)
            .bind(&product.description)
            .bind(product.price)
            .bind(&product.img_url)
            .bind(product.date)
            .fetch_one(&mut *tx)
            .await?;
            link_categories(&mut *tx, &product).await?;
            tx.commit().await?;
            tracing::info!("Product {} have been saved", product.id);
            Ok::<_, sqlx::Error>(product)
        }
        .instrument(query_span)
        .await
        .map_err(query_error("insert product"))
    }

    async fn update(&self, product: models::Product) -> Result<Option<models::Product>> {
        let query_span = tracing::info_span!("Updating product", id = product.id);
        async {
            let mut tx = self.pool.begin().await?;
            let result = sqlx::query(
                r#"
                UPDATE tb_product
                SET name = $2, description = $3, price = $4, img_url = $5, date = $6
                WHERE id = $1
                "#,
            )
            .bind(product.id)
            .bind(&product.name)
            .bind(&product.description)
            .bind(product.price)
            .bind(&product.img_url)
            .bind(product.date)
            .execute(&mut *tx)
            .await?;

            if result.rows_affected() == 0 {
                tx.rollback().await?;
                return Ok(None);
            }

            sqlx::query("DELETE FROM tb_product_category WHERE product_id = $1")
                .bind(product.id)
                .execute(&mut *tx)
                .await?;
            link_categories(&mut *tx, &product).await?;
            tx.commit().await?;
            Ok::<_, sqlx::Error>(Some(product))
        }
        .instrument(query_span)
        .await
        .map_err(query_error("update product"))
    }

    #[tracing::instrument(name = "Delete product.", skip(self))]
    async fn delete_by_id(&self, id: i64) -> Result<bool> {
        // join rows go with the product (ON DELETE CASCADE)
        sqlx::query("DELETE FROM tb_product WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map(|result| result.rows_affected() > 0)
            .map_err(query_error("delete product"))
    }
}
