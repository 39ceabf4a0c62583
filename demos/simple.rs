//! # Simple HTTP Transport Example
//!
//! This example sends one JSON-RPC call through the HTTP transport and waits
//! for the matching response on the data channel, the way a JSON-RPC client
//! owning the transport would.
//!
//! ## Running This Example
//!
//! ```bash
//! cargo run --example simple -- http://localhost:8545 eth_blockNumber
//! ```
//!
//! Note: You need a JSON-RPC server listening at the given URL.

use std::time::Duration;

use jrpc_transport_http::{Error, HttpTransport, Transport, TransportConfig};
use serde_json::json;

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter("jrpc_transport_http=debug")
        .init();

    let mut args = std::env::args().skip(1);
    let url = args.next().unwrap_or_else(|| "http://localhost:8545".to_string());
    let method = args.next().unwrap_or_else(|| "ping".to_string());

    let mut config = TransportConfig::new(url.as_str());
    if let (Ok(username), Ok(password)) = (std::env::var("RPC_USERNAME"), std::env::var("RPC_PASSWORD")) {
        config = config.with_credentials(username, password);
    }

    let transport = HttpTransport::new(config)?;
    let mut data = transport.subscribe();

    let request = json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": method,
        "params": [],
    });

    println!("Calling {} on {}", method, url);
    if let Err(e) = transport.send(&request.to_string()).await {
        println!("Call failed: {}", e);
        if e.is_retryable() {
            println!("The server may be down, try again later.");
        }
        return Ok(());
    }

    // Responses arrive on the data channel; match them by id.
    let wait = async {
        while let Some(message) = data.recv().await {
            if message.get("id") == Some(&json!(1)) {
                return Some(message);
            }
        }
        None
    };

    match tokio::time::timeout(Duration::from_secs(5), wait).await {
        Ok(Some(message)) => match message.get("error") {
            Some(error) => println!("RPC error: {}", error),
            None => println!("Result: {}", message.get("result").unwrap_or(&json!(null))),
        },
        _ => println!("No response received"),
    }

    Ok(())
}
