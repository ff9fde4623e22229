use crate::forms;
use crate::routes::location;
use crate::services::{ProductService, ServiceError};
use actix_web::{http::header, post, web, HttpRequest, HttpResponse};

#[tracing::instrument(name = "Add product.", skip(req, service))]
#[post("")]
pub async fn item(
    req: HttpRequest,
    form: web::Json<forms::ProductForm>,
    service: web::Data<ProductService>,
) -> Result<HttpResponse, ServiceError> {
    let product = service.insert(form.into_inner()).await?;
    tracing::info!("Product {} created", product.id);

    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, location(&req, product.id)))
        .json(product))
}
