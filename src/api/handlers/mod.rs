//! HTTP handlers
//!
//! Thin translation between HTTP and the services. Handlers extract the
//! resolved owner, delegate, and map results onto status codes; all
//! error mapping lives in `AppError`.

pub mod auth;
pub mod lists;
pub mod tasks;
