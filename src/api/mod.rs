//! HTTP API: routing, handlers, extractors and middleware.

pub mod docs;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod server;

pub use server::{build_router, run_server};
