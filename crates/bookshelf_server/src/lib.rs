//! Request routing and process wiring for the bookshelf catalog.
//!
//! The catalog itself lives in `bookshelf_core`; this crate only maps
//! HTTP requests onto `CatalogStore` operations and loads host/port config.

pub mod config;
pub mod error;
pub mod routes;
pub mod server;

pub use config::{ConfigError, ServerConfig};
pub use error::{ApiError, ServerError};
pub use routes::router;
pub use server::serve;
