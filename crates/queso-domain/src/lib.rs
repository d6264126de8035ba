//! Domain types shared across Queso & Sabor crates.
//!
//! This crate contains only pure types with no framework dependencies.
//! Storage and wire formats are fixed here so every layer agrees on them.

pub mod id;
pub mod order;
pub mod product;
pub mod user;
