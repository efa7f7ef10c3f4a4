//! HTTP middleware and error mapping.

pub mod error;
pub mod logging;
pub mod rate_limit;
