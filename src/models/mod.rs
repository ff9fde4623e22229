mod category;
mod product;
mod role;
mod user;

pub use category::*;
pub use product::*;
pub use role::*;
pub use user::*;
