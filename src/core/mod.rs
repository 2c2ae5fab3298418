//! Core module containing shared infrastructure components.
//!
//! This module provides the foundational building blocks for the API
//! server: configuration, error handling, storage, server assembly and the
//! HTTP transport.

pub mod config;
pub mod error;
pub mod server;
pub mod storage;
pub mod transport;

pub use config::Config;
pub use error::{ApiError, ApiResult, Error, Result};
pub use server::{ApiServer, AppState};
pub use storage::{Session, Storage};
pub use transport::{HttpConfig, HttpTransport};
