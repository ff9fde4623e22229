use crate::configuration::PaginationSettings;
use crate::forms::PageParams;
use crate::services::{ProductService, ServiceError};
use actix_web::{get, web, Responder};

#[tracing::instrument(name = "Get product page.", skip(service, pagination))]
#[get("")]
pub async fn list(
    query: web::Query<PageParams>,
    service: web::Data<ProductService>,
    pagination: web::Data<PaginationSettings>,
) -> Result<impl Responder, ServiceError> {
    let request = query.into_inner().into_request(&pagination)?;
    service.find_all_paged(&request).await.map(web::Json)
}

#[tracing::instrument(name = "Get product.", skip(service))]
#[get("/{id}")]
pub async fn item(
    path: web::Path<(i64,)>,
    service: web::Data<ProductService>,
) -> Result<impl Responder, ServiceError> {
    let id = path.0;
    service.find_by_id(id).await.map(web::Json)
}
