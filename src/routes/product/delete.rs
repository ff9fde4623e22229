use crate::services::{ProductService, ServiceError};
use actix_web::{delete, web, HttpResponse};

#[tracing::instrument(name = "Delete product.", skip(service))]
#[delete("/{id}")]
pub async fn item(
    path: web::Path<(i64,)>,
    service: web::Data<ProductService>,
) -> Result<HttpResponse, ServiceError> {
    service.delete(path.0).await?;
    Ok(HttpResponse::NoContent().finish())
}
