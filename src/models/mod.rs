mod cart;
mod category;
mod product;
mod user;

pub use cart::*;
pub use category::*;
pub use product::*;
pub use user::*;
