//! # jrpc-transport-http: HTTP(S) transport for JSON-RPC clients
//!
//! This crate provides an interchangeable transport for JSON-RPC client
//! frameworks. It takes already-serialized JSON-RPC documents, posts them to
//! a server over HTTP(S), and hands the response bodies back to the owning
//! client through a data notification channel.
//!
//! ## Features
//!
//! - Connectionless: [`Transport::needs_connection`] is always `false`
//! - HTTP Basic authentication computed once at construction
//! - Pass-through HTTP client options (timeouts, headers, proxy, redirects)
//! - Response data delivered asynchronously to any number of listeners
//!
//! ```no_run
//! use jrpc_transport_http::{HttpTransport, Transport, TransportConfig};
//!
//! # async fn run() -> Result<(), jrpc_transport_http::Error> {
//! let transport = HttpTransport::new(
//!     TransportConfig::new("http://localhost:8545").with_credentials("user", "secret"),
//! )?;
//!
//! let mut data = transport.subscribe();
//! transport.send(r#"{"jsonrpc":"2.0","method":"ping","id":1}"#).await?;
//!
//! if let Some(response) = data.recv().await {
//!     println!("{}", response);
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod transport;
pub mod utils;

// Re-export commonly used types for convenience
pub use config::TransportConfig;
pub use error::{Error, Result, TransportErrorKind};
pub use transport::{DataReceiver, HttpTransport, Transport};
