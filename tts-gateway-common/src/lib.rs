//! TTS Gateway Common Library
//!
//! Shared configuration, bearer-token auth, error handling, tracing, and
//! HTTP server plumbing for the text-to-speech gateway.

pub mod auth;
pub mod config;
pub mod error;
pub mod listen;
pub mod server;
pub mod tracing;

#[cfg(test)]
mod error_test;
#[cfg(test)]
mod listen_test;

pub use auth::BearerAuth;
pub use config::{AudioConfig, CloudflareConfig, Config, RivaConfig};
pub use error::{AuthError, ConfigError, Error, Result};
pub use listen::ListenArgs;
pub use server::{HttpServerBuilder, ServerError, shutdown_channel};
