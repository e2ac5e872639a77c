//! HTTP API handlers.

pub mod health;
pub mod plan;
pub mod search;
