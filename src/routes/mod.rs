#[cfg(test)]
#[macro_use]
pub(crate) mod fixtures;

pub mod category;
pub mod health_checks;
pub mod product;
pub mod role;
pub mod user;

pub use health_checks::*;

use actix_web::HttpRequest;

/// URL of a freshly created row: the request URL with the new id appended.
pub(crate) fn location(req: &HttpRequest, id: i64) -> String {
    let info = req.connection_info();
    format!(
        "{}://{}{}/{}",
        info.scheme(),
        info.host(),
        req.path().trim_end_matches('/'),
        id
    )
}
