use crate::configuration::Settings;
use crate::db;
use crate::middleware;
use crate::routes;
use crate::services::{CategoryService, ProductService, RoleService, ServiceError, UserService};
use actix_cors::Cors;
use actix_web::{dev::Server, error, web, App, HttpServer};
use sqlx::{Pool, Postgres};
use std::net::TcpListener;
use std::sync::Arc;
use tracing_actix_web::TracingLogger;

pub async fn run(
    listener: TcpListener,
    pg_pool: Pool<Postgres>,
    settings: Settings,
) -> Result<Server, std::io::Error> {
    let categories = Arc::new(db::PgCategoryRepository::new(pg_pool.clone()));
    let roles = Arc::new(db::PgRoleRepository::new(pg_pool.clone()));

    let product_service = web::Data::new(ProductService::new(
        Arc::new(db::PgProductRepository::new(pg_pool.clone())),
        categories.clone(),
    ));
    let category_service = web::Data::new(CategoryService::new(categories));
    let role_service = web::Data::new(RoleService::new(roles.clone()));
    let user_service = web::Data::new(UserService::new(
        Arc::new(db::PgUserRepository::new(pg_pool)),
        roles,
    ));
    let pagination = web::Data::new(settings.pagination);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(middleware::error_handlers())
            .wrap(TracingLogger::default())
            .wrap(Cors::permissive())
            .app_data(pagination.clone())
            .app_data(product_service.clone())
            .app_data(category_service.clone())
            .app_data(role_service.clone())
            .app_data(user_service.clone())
            .configure(configure)
    })
    .listen(listener)?
    .run();

    Ok(server)
}

/// Every endpoint plus the extractor configs that turn malformed input into
/// [`ServiceError::BadRequest`].
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(query_config())
        .app_data(path_config())
        .service(web::scope("/health_check").service(routes::health_check))
        .service(
            web::scope("/products")
                .service(routes::product::get::list)
                .service(routes::product::get::item)
                .service(routes::product::add::item)
                .service(routes::product::update::item)
                .service(routes::product::delete::item),
        )
        .service(
            web::scope("/categories")
                .service(routes::category::get::list)
                .service(routes::category::get::item)
                .service(routes::category::add::item)
                .service(routes::category::update::item)
                .service(routes::category::delete::item),
        )
        .service(
            web::scope("/roles")
                .service(routes::role::get::list)
                .service(routes::role::get::item)
                .service(routes::role::add::item)
                .service(routes::role::update::item)
                .service(routes::role::delete::item),
        )
        .service(
            web::scope("/users")
                .service(routes::user::get::list)
                .service(routes::user::get::item)
                .service(routes::user::add::item)
                .service(routes::user::update::item)
                .service(routes::user::delete::item),
        );
}

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let message = match err {
            error::JsonPayloadError::Deserialize(err) => format!(
                "Malformed JSON at line {}, column {}: {}",
                err.line(),
                err.column(),
                err
            ),
            err => err.to_string(),
        };
        tracing::info!("Rejected request body: {}", message);
        ServiceError::BadRequest(message).into()
    })
}

fn query_config() -> web::QueryConfig {
    web::QueryConfig::default()
        .error_handler(|err, _req| ServiceError::BadRequest(err.to_string()).into())
}

fn path_config() -> web::PathConfig {
    web::PathConfig::default()
        .error_handler(|err, _req| ServiceError::BadRequest(err.to_string()).into())
}
