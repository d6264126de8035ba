//! sea-orm entities for the shop store.

pub mod orders;
pub mod products;
pub mod users;
