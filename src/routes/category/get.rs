use crate::configuration::PaginationSettings;
use crate::forms::PageParams;
use crate::services::{CategoryService, ServiceError};
use actix_web::{get, web, Responder};

#[tracing::instrument(name = "Get category page.", skip(service, pagination))]
#[get("")]
pub async fn list(
    query: web::Query<PageParams>,
    service: web::Data<CategoryService>,
    pagination: web::Data<PaginationSettings>,
) -> Result<impl Responder, ServiceError> {
    let request = query.into_inner().into_request(&pagination)?;
    service.find_all_paged(&request).await.map(web::Json)
}

#[tracing::instrument(name = "Get category.", skip(service))]
#[get("/{id}")]
pub async fn item(
    path: web::Path<(i64,)>,
    service: web::Data<CategoryService>,
) -> Result<impl Responder, ServiceError> {
    service.find_by_id(path.0).await.map(web::Json)
}
