use crate::forms;
use crate::routes::location;
use crate::services::{RoleService, ServiceError};
use actix_web::{http::header, post, web, HttpRequest, HttpResponse};

#[tracing::instrument(name = "Add role.", skip(req, service))]
#[post("")]
pub async fn item(
    req: HttpRequest,
    form: web::Json<forms::RoleForm>,
    service: web::Data<RoleService>,
) -> Result<HttpResponse, ServiceError> {
    let role = service.insert(form.into_inner()).await?;

    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, location(&req, role.id)))
        .json(role))
}
