use crate::forms;
use crate::services::{ProductService, ServiceError};
use actix_web::{put, web, Responder};

#[tracing::instrument(name = "Update product.", skip(service))]
#[put("/{id}")]
pub async fn item(
    path: web::Path<(i64,)>,
    form: web::Json<forms::ProductForm>,
    service: web::Data<ProductService>,
) -> Result<impl Responder, ServiceError> {
    let id = path.0;
    service.update(id, form.into_inner()).await.map(web::Json)
}
