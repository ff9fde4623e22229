use crate::forms;
use crate::services::{ServiceError, UserService};
use actix_web::{put, web, Responder};

#[tracing::instrument(name = "Update user.", skip(form, service))]
#[put("/{id}")]
pub async fn item(
    path: web::Path<(i64,)>,
    form: web::Json<forms::UserUpdateForm>,
    service: web::Data<UserService>,
) -> Result<impl Responder, ServiceError> {
    service.update(path.0, form.into_inner()).await.map(web::Json)
}
