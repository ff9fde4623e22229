mod error_handlers;

pub use error_handlers::*;
