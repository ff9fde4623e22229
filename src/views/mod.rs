mod category;
mod product;
mod role;
mod user;

pub use category::Category;
pub use product::Product;
pub use role::Role;
pub use user::User;
