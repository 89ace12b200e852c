// HTTP module - minimal JSON-over-HTTP transport for the dispatch layer

pub mod config;
pub mod error;
pub mod server;

pub use config::HttpConfig;
pub use error::{HttpError, HttpInitError};
pub use server::HttpServer;
