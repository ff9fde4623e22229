use crate::db::{begin_read_only, order_by, query_error};
use crate::models;
use crate::repository::{Page, PageRequest, Repository, Result, UserRepository};
use async_trait::async_trait;
use sqlx::{PgConnection, PgPool};
use std::collections::HashMap;
use tracing::Instrument;

const SORTABLE: &[(&str, &str)] = &[
    ("id", "id"),
    ("firstName", "first_name"),
    ("lastName", "last_name"),
    ("email", "email"),
];

const COLUMNS: &str = "id, first_name, last_name, email, password";

#[derive(sqlx::FromRow)]
struct RoleLink {
    user_id: i64,
    id: i64,
    authority: String,
}

#[derive(Clone, Debug)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

async fn attach_roles(
    conn: &mut PgConnection,
    users: &mut [models::User],
) -> std::result::Result<(), sqlx::Error> {
    if users.is_empty() {
        return Ok(());
    }
    let ids: Vec<i64> = users.iter().map(|u| u.id).collect();
    let links = sqlx::query_as::<_, RoleLink>(
        r#"
        SELECT ur.user_id, r.id, r.authority
        FROM tb_user_role ur
        JOIN tb_role r ON r.id = ur.role_id
        WHERE ur.user_id = ANY($1)
        ORDER BY r.id
        "#,
    )
    .bind(ids)
    .fetch_all(&mut *conn)
    .await?;

    let mut by_user: HashMap<i64, Vec<models::Role>> = HashMap::new();
    for link in links {
        by_user.entry(link.user_id).or_default().push(models::Role {
            id: link.id,
            authority: link.authority,
        });
    }
    for user in users.iter_mut() {
        user.roles = by_user.remove(&user.id).unwrap_or_default();
    }
    Ok(())
}

async fn link_roles(
    conn: &mut PgConnection,
    user: &models::User,
) -> std::result::Result<(), sqlx::Error> {
    if user.roles.is_empty() {
        return Ok(());
    }
    sqlx::query(
        r#"
        INSERT INTO tb_user_role (user_id, role_id)
        SELECT $1, UNNEST($2::bigint[])
        ON CONFLICT DO NOTHING
        "#,
    )
    .bind(user.id)
    .bind(user.role_ids())
    .execute(&mut *conn)
    .await?;
    Ok(())
}

enum Lookup<'a> {
    Id(i64),
    Email(&'a str),
}

impl PgUserRepository {
    async fn fetch_one(
        &self,
        lookup: Lookup<'_>,
    ) -> std::result::Result<Option<models::User>, sqlx::Error> {
        let mut tx = begin_read_only(&self.pool).await?;
        let user = match lookup {
            Lookup::Id(id) => {
                sqlx::query_as::<_, models::User>(&format!(
                    "SELECT {} FROM tb_user WHERE id = $1",
                    COLUMNS
                ))
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?
            }
            Lookup::Email(email) => {
                sqlx::query_as::<_, models::User>(&format!(
                    "SELECT {} FROM tb_user WHERE email = $1",
                    COLUMNS
                ))
                .bind(email)
                .fetch_optional(&mut *tx)
                .await?
            }
        };

        let user = match user {
            Some(mut user) => {
                attach_roles(&mut *tx, std::slice::from_mut(&mut user)).await?;
                Some(user)
            }
            None => None,
        };
        tx.commit().await?;
        Ok(user)
    }
}

#[async_trait]
impl Repository<models::User> for PgUserRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<models::User>> {
        let query_span = tracing::info_span!("Fetch user by id.", id);
        self.fetch_one(Lookup::Id(id))
            .instrument(query_span)
            .await
            .map_err(query_error("fetch user"))
    }

    async fn find_all_by_id(&self, ids: &[i64]) -> Result<Vec<models::User>> {
        let query_span = tracing::info_span!("Fetch users by ids.", ?ids);
        async {
            let mut tx = begin_read_only(&self.pool).await?;
            let mut users = sqlx::query_as::<_, models::User>(&format!(
                "SELECT {} FROM tb_user WHERE id = ANY($1) ORDER BY id",
                COLUMNS
            ))
            .bind(ids.to_vec())
            .fetch_all(&mut *tx)
            .await?;
            attach_roles(&mut *tx, &mut users).await?;
            tx.commit().await?;
            Ok::<_, sqlx::Error>(users)
        }
        .instrument(query_span)
        .await
        .map_err(query_error("fetch users"))
    }

    async fn find_all(&self, request: &PageRequest) -> Result<Page<models::User>> {
        let sql = format!(
            "SELECT {} FROM tb_user {} LIMIT $1 OFFSET $2",
            COLUMNS,
            order_by(request.sort.as_ref(), SORTABLE)?
        );
        let query_span =
            tracing::info_span!("Fetch user page.", page = request.page, size = request.size);

        async {
            let mut tx = begin_read_only(&self.pool).await?;
            let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tb_user")
                .fetch_one(&mut *tx)
                .await?;
            let mut content = sqlx::query_as::<_, models::User>(&sql)
                .bind(request.limit())
                .bind(request.offset())
                .fetch_all(&mut *tx)
                .await?;
            attach_roles(&mut *tx, &mut content).await?;
            tx.commit().await?;
            Ok::<_, sqlx::Error>(Page::new(content, request, total as u64))
        }
        .instrument(query_span)
        .await
        .map_err(query_error("fetch user page"))
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool> {
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM tb_user WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(query_error("check user existence"))
    }

    async fn insert(&self, mut user: models::User) -> Result<models::User> {
        let query_span = tracing::info_span!("Saving new user into the database");
        async {
            let mut tx = self.pool.begin().await?;
            user.id = sqlx::query_scalar::<_, i64>(
                r#"
                INSERT INTO tb_user (first_name, last_name, email, password)
                VALUES ($1, $2, $3, $4)
                RETURNING id
                "#,
            )
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(&user.email)
            .bind(&user.password)
            .fetch_one(&mut *tx)
            .await?;
            link_roles(&mut *tx, &user).await?;
            tx.commit().await?;
            tracing::info!("User {} have been saved", user.id);
            Ok::<_, sqlx::Error>(user)
        }
        .instrument(query_span)
        .await
        .map_err(query_error("insert user"))
    }

    async fn update(&self, user: models::User) -> Result<Option<models::User>> {
        let query_span = tracing::info_span!("Updating user", id = user.id);
        async {
            let mut tx = self.pool.begin().await?;
            // password is only ever written on insert
            let result = sqlx::query(
                r#"
                UPDATE tb_user
                SET first_name = $2, last_name = $3, email = $4
                WHERE id = $1
                "#,
            )
            .bind(user.id)
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(&user.email)
            .execute(&mut *tx)
            .await?;

            if result.rows_affected() == 0 {
                tx.rollback().await?;
                return Ok(None);
            }

            sqlx::query("DELETE FROM tb_user_role WHERE user_id = $1")
                .bind(user.id)
                .execute(&mut *tx)
                .await?;
            link_roles(&mut *tx, &user).await?;
            tx.commit().await?;
            Ok::<_, sqlx::Error>(Some(user))
        }
        .instrument(query_span)
        .await
        .map_err(query_error("update user"))
    }

    #[tracing::instrument(name = "Delete user.", skip(self))]
    async fn delete_by_id(&self, id: i64) -> Result<bool> {
        sqlx::query("DELETE FROM tb_user WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map(|result| result.rows_affected() > 0)
            .map_err(query_error("delete user"))
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<models::User>> {
        let query_span = tracing::info_span!("Fetch user by email.");
        self.fetch_one(Lookup::Email(email))
            .instrument(query_span)
            .await
            .map_err(query_error("fetch user by email"))
    }
}
