//! Transport layer for JSON-RPC clients
//!
//! A transport moves serialized JSON-RPC documents to a server and hands
//! whatever the server sends back to its owner through a data notification
//! channel. The owning client does request/response correlation, retries and
//! call timeouts; a transport only delivers payloads.

mod events;
mod http;
mod options;

pub use events::{DataEmitter, DataReceiver};
pub use http::HttpTransport;
pub use options::DEFAULT_TIMEOUT_MS;

use async_trait::async_trait;
use crate::error::Error;

/// Transport interface used by JSON-RPC clients
#[async_trait]
pub trait Transport: Send + Sync {
    /// Whether `connect` must be called before sending.
    ///
    /// Connectionless transports return `false`: every `send` is
    /// self-contained.
    fn needs_connection(&self) -> bool;

    /// Open the underlying channel.
    ///
    /// Only called by clients when `needs_connection` is `true`.
    async fn connect(&self) -> Result<(), Error> {
        Ok(())
    }

    /// Close the underlying channel.
    ///
    /// Only called by clients when `needs_connection` is `true`.
    async fn disconnect(&self) -> Result<(), Error> {
        Ok(())
    }

    /// Send a serialized JSON-RPC document to the server.
    ///
    /// Resolves once the payload has been delivered. Any data the server
    /// sends back arrives through `subscribe`, never as the return value,
    /// and is never delivered inside this call. Subscribe before sending to
    /// be sure to receive it; subscribing right after `send` returns only
    /// works on a current-thread runtime.
    async fn send(&self, data: &str) -> Result<(), Error>;

    /// Register a listener for data received from the server.
    ///
    /// The listener gets data emitted after it was registered. On a
    /// multi-threaded runtime, data from a `send` that already returned may
    /// have been delivered before this call.
    fn subscribe(&self) -> DataReceiver;
}
