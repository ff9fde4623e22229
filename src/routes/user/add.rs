use crate::forms;
use crate::routes::location;
use crate::services::{ServiceError, UserService};
use actix_web::{http::header, post, web, HttpRequest, HttpResponse};

// the form carries the raw password, keep it out of the span
#[tracing::instrument(name = "Add user.", skip(req, form, service))]
#[post("")]
pub async fn item(
    req: HttpRequest,
    form: web::Json<forms::UserInsertForm>,
    service: web::Data<UserService>,
) -> Result<HttpResponse, ServiceError> {
    let user = service.insert(form.into_inner()).await?;

    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, location(&req, user.id)))
        .json(user))
}
