use crate::services::{CategoryService, ServiceError};
use actix_web::{delete, web, HttpResponse};

#[tracing::instrument(name = "Delete category.", skip(service))]
#[delete("/{id}")]
pub async fn item(
    path: web::Path<(i64,)>,
    service: web::Data<CategoryService>,
) -> Result<HttpResponse, ServiceError> {
    service.delete(path.0).await?;
    Ok(HttpResponse::NoContent().finish())
}
