//! Service plumbing shared by Queso & Sabor binaries: configuration loading,
//! tracing, request ids, health checks and wire serializers.

pub mod config;
pub mod health;
pub mod middleware;
pub mod serde;
pub mod tracing;
