//! Authentication primitives for the shop service.
//!
//! Provides password hashing, JWT issuance/validation, and bearer-header parsing.
//! Nothing here touches the store; user lookup happens in the service's access chain.

pub mod bearer;
pub mod password;
pub mod token;
