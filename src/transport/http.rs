//! HTTP transport implementation
//!
//! Every `send` becomes one HTTP `POST` of the JSON-RPC document to the root
//! path of the configured server URL. A non-empty response body is handed to
//! the data listeners from a separate task, after `send` has returned.

use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::header::HeaderMap;
use reqwest::Client as HttpClient;
use serde_json::Value;
use url::Url;

use crate::config::TransportConfig;
use crate::error::{Error, TransportErrorKind};

use super::events::{DataEmitter, DataReceiver};
use super::options::HttpClientOptions;
use super::Transport;

/// HTTP(S) transport
pub struct HttpTransport {
    /// URL every request is posted to
    endpoint: Url,
    /// HTTP client
    client: HttpClient,
    /// Headers the client sends with every request
    headers: HeaderMap,
    /// Data notification channel
    emitter: DataEmitter,
}

impl HttpTransport {
    /// Create a new HTTP transport.
    ///
    /// Builds the HTTP client without touching the network. Fails with
    /// [`Error::ConfigError`] on an unusable configuration.
    pub fn new(config: TransportConfig) -> Result<Self, Error> {
        let base_url = config.base_url()?;

        if config.has_partial_credentials() {
            warn!(
                "Only one of username/password is set for {}, sending requests without authorization",
                base_url
            );
        }

        let options = HttpClientOptions::resolve(&config, &base_url)?;
        let headers = options.default_headers()?;
        let client = options.build_client(headers.clone())?;
        let endpoint = options.endpoint()?;

        info!("HTTP transport created for {}", endpoint);

        Ok(Self {
            endpoint,
            client,
            headers,
            emitter: DataEmitter::new(),
        })
    }

    /// Create a new HTTP transport with default options
    pub fn from_url(url: &str) -> Result<Self, Error> {
        Self::new(TransportConfig::new(url))
    }

    /// URL every request is posted to
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Headers sent with every request
    pub fn default_headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Number of live data listeners
    pub fn listener_count(&self) -> usize {
        self.emitter.listener_count()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    fn needs_connection(&self) -> bool {
        false
    }

    async fn send(&self, data: &str) -> Result<(), Error> {
        let payload = parse_payload(data)?;

        debug!("Sending HTTP request to {}", self.endpoint);

        let response = self.client
            .post(self.endpoint.clone())
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::status(
                status.as_u16(),
                format!("HTTP request failed with status: {}", status),
            ));
        }

        let body = response.bytes().await?;

        match decode_body(&body)? {
            Some(data) => self.emitter.emit_deferred(data),
            None => debug!("HTTP response from {} has no body", self.endpoint),
        }

        Ok(())
    }

    fn subscribe(&self) -> DataReceiver {
        self.emitter.subscribe()
    }
}

/// Parse an outgoing payload into the structured request body
fn parse_payload(data: &str) -> Result<Value, Error> {
    if data.is_empty() {
        return Err(Error::ValidationError(r#"missing/invalid "data" parameter"#.to_string()));
    }

    let payload: Value = serde_json::from_str(data)?;
    if !payload.is_object() && !payload.is_array() {
        return Err(Error::ValidationError(
            "data must be a JSON object or array".to_string(),
        ));
    }

    Ok(payload)
}

/// Decode a response body, `None` when there is nothing to deliver
fn decode_body(body: &[u8]) -> Result<Option<Value>, Error> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }

    let data: Value = serde_json::from_slice(body).map_err(|e| {
        Error::transport(
            TransportErrorKind::Decode,
            format!("Failed to parse response: {}", e),
        )
    })?;

    Ok(if is_blank(&data) { None } else { Some(data) })
}

/// `null`, `false`, zero and `""` carry nothing worth delivering
fn is_blank(data: &Value) -> bool {
    match data {
        Value::Null | Value::Bool(false) => true,
        Value::Number(number) => number.as_f64() == Some(0.0),
        Value::String(text) => text.is_empty(),
        _ => false,
    }
}
