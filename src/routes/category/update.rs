use crate::forms;
use crate::services::{CategoryService, ServiceError};
use actix_web::{put, web, Responder};

#[tracing::instrument(name = "Update category.", skip(service))]
#[put("/{id}")]
pub async fn item(
    path: web::Path<(i64,)>,
    form: web::Json<forms::CategoryForm>,
    service: web::Data<CategoryService>,
) -> Result<impl Responder, ServiceError> {
    service.update(path.0, form.into_inner()).await.map(web::Json)
}
