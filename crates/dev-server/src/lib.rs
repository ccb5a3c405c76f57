//! Local static-file server for the Hex3World demo.
//!
//! Scans for a free port, then serves a directory over plain HTTP with an
//! allow-all CORS header on every response. STL assets are served as raw
//! `application/octet-stream`.

pub mod config;
pub mod errors;
pub mod handler;
pub mod http;
pub mod mime;
pub mod port;
pub mod server;

pub use config::ServerConfig;
pub use errors::{ConfigError, RequestError, ServeError};
pub use handler::{Dispatcher, Responder, CORS_HEADER};
pub use port::{find_free_port, find_free_port_with};
pub use server::DevServer;
