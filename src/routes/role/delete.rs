use crate::services::{RoleService, ServiceError};
use actix_web::{delete, web, HttpResponse};

#[tracing::instrument(name = "Delete role.", skip(service))]
#[delete("/{id}")]
pub async fn item(
    path: web::Path<(i64,)>,
    service: web::Data<RoleService>,
) -> Result<HttpResponse, ServiceError> {
    service.delete(path.0).await?;
    Ok(HttpResponse::NoContent().finish())
}
