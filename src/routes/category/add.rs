use crate::forms;
use crate::routes::location;
use crate::services::{CategoryService, ServiceError};
use actix_web::{http::header, post, web, HttpRequest, HttpResponse};

#[tracing::instrument(name = "Add category.", skip(req, service))]
#[post("")]
pub async fn item(
    req: HttpRequest,
    form: web::Json<forms::CategoryForm>,
    service: web::Data<CategoryService>,
) -> Result<HttpResponse, ServiceError> {
    let category = service.insert(form.into_inner()).await?;

    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, location(&req, category.id)))
        .json(category))
}
