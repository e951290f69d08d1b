//! HTTP API: router and request handlers

pub mod handlers;
pub mod server;

pub use server::{create_router, AppContext};
