use crate::services::{ServiceError, UserService};
use actix_web::{delete, web, HttpResponse};

#[tracing::instrument(name = "Delete user.", skip(service))]
#[delete("/{id}")]
pub async fn item(
    path: web::Path<(i64,)>,
    service: web::Data<UserService>,
) -> Result<HttpResponse, ServiceError> {
    service.delete(path.0).await?;
    Ok(HttpResponse::NoContent().finish())
}
