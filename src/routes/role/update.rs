use crate::forms;
use crate::services::{RoleService, ServiceError};
use actix_web::{put, web, Responder};

#[tracing::instrument(name = "Update role.", skip(service))]
#[put("/{id}")]
pub async fn item(
    path: web::Path<(i64,)>,
    form: web::Json<forms::RoleForm>,
    service: web::Data<RoleService>,
) -> Result<impl Responder, ServiceError> {
    service.update(path.0, form.into_inner()).await.map(web::Json)
}
