//! todo-api library
//!
//! This library exposes the core functionality of the to-do API for
//! integration testing and potential future library use.

pub mod api;
pub mod app;
pub mod auth;
pub mod config;
pub mod crypto;
pub mod database;
pub mod error;
pub mod services;
