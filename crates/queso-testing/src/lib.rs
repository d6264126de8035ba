//! Test utilities for Queso & Sabor services.
//!
//! Import from dev-dependencies only, never from production code.

pub mod auth;
