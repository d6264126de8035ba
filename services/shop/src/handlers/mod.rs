pub mod extract;
pub mod order;
pub mod product;
pub mod root;
pub mod user;
