//! Transport layer for the API server.
//!
//! Binds the configured address and serves the router built by
//! [`ApiServer`](crate::core::ApiServer).

mod config;
mod error;
mod http;

pub use config::HttpConfig;
pub use error::{TransportError, TransportResult};
pub use http::HttpTransport;
