pub mod comment;
pub mod product;

pub use comment::*;
pub use product::*;
