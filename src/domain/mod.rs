pub mod user;
pub mod product;
pub mod validation;

pub use user::*;
pub use product::*;
pub use validation::*;
