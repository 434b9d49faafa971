//! HTTP delivery layer

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::{cors_layer, router};
