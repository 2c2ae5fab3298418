//! HBnB API Library
//!
//! REST API over six related resource kinds (State, City, Amenity, User,
//! Place, Review) with pluggable storage.
//!
//! # Architecture
//!
//! - **core**: Configuration, error handling, storage engines and sessions,
//!   router assembly and the HTTP transport
//! - **domains**: Business logic organized by bounded contexts
//!   - **resources**: The generic resource endpoint contract and the
//!     per-kind definitions driving it
//!
//! # Example
//!
//! ```rust,no_run
//! use hbnb_api::Config;
//!
//! #[tokio::main]
//! async fn main() -> hbnb_api::Result<()> {
//!     hbnb_api::run(Config::from_env()).await
//! }
//! ```

pub mod core;
pub mod domains;

use tracing::info;

// Re-export commonly used types for convenience
pub use crate::core::{ApiServer, Config, Error, Result};
use crate::core::{HttpTransport, Storage};

/// Open the configured storage and serve the API until shutdown.
pub async fn run(config: Config) -> Result<()> {
    let storage = Storage::from_config(&config.storage).await?;
    let transport = HttpTransport::new(config.transport.clone());
    let server = ApiServer::new(config, storage);

    info!(
        "Server {} v{} initialized ({} storage)",
        server.name(),
        server.version(),
        server.storage().engine_name()
    );

    transport.run(server).await?;
    Ok(())
}
