use crate::helpers::ErrorResponse;
use crate::services::ServiceError;
use actix_web::dev::ServiceResponse;
use actix_web::http::StatusCode;
use actix_web::middleware::{ErrorHandlerResponse, ErrorHandlers};
use actix_web::HttpResponse;

/// Re-renders every 4xx/5xx response, including the framework's own
/// (unknown route, wrong method), as an [`ErrorResponse`] carrying the
/// request path.
pub fn error_handlers<B: 'static>() -> ErrorHandlers<B> {
    ErrorHandlers::new()
        .default_handler_client(render_error)
        .default_handler_server(render_error)
}

fn render_error<B>(res: ServiceResponse<B>) -> actix_web::Result<ErrorHandlerResponse<B>> {
    let status = res.status();
    let body = match res.response().error() {
        Some(err) => match err.as_error::<ServiceError>() {
            Some(service_err) => service_err.to_body(),
            None if status.is_server_error() => {
                tracing::error!("Unhandled server error: {:?}", err);
                ErrorResponse::build(status, label(status)).set_message(label(status))
            }
            None => ErrorResponse::build(status, label(status)).set_message(&err.to_string()),
        },
        None => ErrorResponse::build(status, label(status))
            .set_message(status.canonical_reason().unwrap_or_default()),
    };
    let body = body.set_path(res.request().path());

    if status.is_server_error() {
        tracing::error!("{} {}: {}", status, body.path, body.message);
    }

    let (req, _) = res.into_parts();
    let response = HttpResponse::build(status).json(body);
    Ok(ErrorHandlerResponse::Response(
        ServiceResponse::new(req, response).map_into_right_body(),
    ))
}

fn label(status: StatusCode) -> &'static str {
    match status {
        StatusCode::NOT_FOUND => ServiceError::not_found("").label(),
        StatusCode::BAD_REQUEST => ServiceError::BadRequest(String::new()).label(),
        StatusCode::UNPROCESSABLE_ENTITY => ServiceError::Validation(vec![]).label(),
        StatusCode::METHOD_NOT_ALLOWED => "Method not allowed",
        status if status.is_server_error() => ServiceError::Internal(String::new()).label(),
        status => status.canonical_reason().unwrap_or("Error"),
    }
}
