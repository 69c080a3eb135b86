//! Listen address configuration for the HTTP front end.
//!
//! # Example
//!
//! ```ignore
//! use tts_gateway_common::listen::ListenArgs;
//! use clap::Parser;
//!
//! #[derive(Parser)]
//! struct Args {
//!     #[command(flatten)]
//!     listen: ListenArgs,
//! }
//!
//! let args = Args::parse();
//! let addr = args.listen.socket_addr();
//! ```

use clap::Args;
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// Default port when neither `--port` nor `PORT` is given.
pub const DEFAULT_PORT: u16 = 8080;

/// Command-line arguments for the listen address.
///
/// Use with `clap::Parser` to add the options to your CLI:
///
/// ```ignore
/// #[derive(Parser)]
/// struct MyArgs {
///     #[command(flatten)]
///     listen: ListenArgs,
/// }
/// ```
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct ListenArgs {
    /// Interface to bind (default: 0.0.0.0, or from HOST env var)
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: IpAddr,

    /// Port to listen on (default: 8080, or from PORT env var)
    #[arg(long, env = "PORT", default_value = "8080")]
    pub port: u16,
}

impl ListenArgs {
    /// Create listen arguments for an explicit host and port.
    pub fn new(host: IpAddr, port: u16) -> Self {
        Self { host, port }
    }

    /// Listen on the loopback interface only.
    pub fn localhost(port: u16) -> Self {
        Self::new(IpAddr::V4(Ipv4Addr::LOCALHOST), port)
    }

    /// The socket address to bind.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl Default for ListenArgs {
    fn default() -> Self {
        Self::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), DEFAULT_PORT)
    }
}

impl fmt::Display for ListenArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.socket_addr())
    }
}
