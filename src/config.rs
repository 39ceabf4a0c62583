//! Transport configuration
//!
//! A [`TransportConfig`] is built once and handed to
//! [`HttpTransport::new`](crate::transport::HttpTransport::new). It can be
//! assembled with the `with_*` methods or loaded from an untyped JSON value
//! with [`TransportConfig::from_value`].
//!
//! The option names are split in two groups:
//!
//! - reserved: `url` (base endpoint), `username` and `password` (Basic
//!   authentication). Inside the extra options, `baseUrl` and `json` are
//!   always overwritten by the transport, and `headers` can only be extended.
//! - pass-through: everything inside `extraOptions` is handed to the HTTP
//!   client configuration.

use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use url::Url;

use crate::error::Error;

/// Extra-option keys that the transport always overwrites
pub const RESERVED_OPTIONS: &[&str] = &["baseUrl", "json"];

/// Configuration of an HTTP transport
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransportConfig {
    /// Server URL
    url: String,
    /// Basic authentication username
    #[serde(default, skip_serializing_if = "Option::is_none")]
    username: Option<String>,
    /// Basic authentication password
    #[serde(default, skip_serializing_if = "Option::is_none")]
    password: Option<String>,
    /// Extra options merged into the HTTP client configuration
    #[serde(
        default,
        rename = "extraOptions",
        alias = "extra",
        skip_serializing_if = "Option::is_none"
    )]
    extra: Option<Map<String, Value>>,
}

impl TransportConfig {
    /// Create a configuration for the given server URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// Load a configuration from an untyped JSON object.
    ///
    /// Recognized keys are `url`, `username`, `password` and `extraOptions`
    /// (or its short form `extra`). `null` counts as absent for the optional
    /// keys.
    pub fn from_value(value: Value) -> Result<Self, Error> {
        let Value::Object(mut options) = value else {
            return Err(Error::ConfigError("missing/invalid transport options".to_string()));
        };

        let url = match options.remove("url") {
            Some(Value::String(url)) if !url.is_empty() => url,
            _ => return Err(Error::ConfigError(r#"missing/invalid "url" option"#.to_string())),
        };

        let username = optional_string(options.remove("username"), "username")?;
        let password = optional_string(options.remove("password"), "password")?;

        let extra = match options.remove("extraOptions").or_else(|| options.remove("extra")) {
            None | Some(Value::Null) => None,
            Some(Value::Object(extra)) => Some(extra),
            Some(_) => {
                return Err(Error::ConfigError(r#"invalid "extraOptions" option"#.to_string()));
            }
        };

        for key in options.keys() {
            debug!("Ignoring unknown transport option {:?}", key);
        }

        Ok(Self {
            url,
            username,
            password,
            extra,
        })
    }

    /// Set both Basic authentication credentials
    pub fn with_credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// Set the Basic authentication username
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Set the Basic authentication password
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Replace the extra HTTP client options
    pub fn with_extra(mut self, extra: Map<String, Value>) -> Self {
        self.extra = Some(extra);
        self
    }

    /// Set a single extra HTTP client option
    pub fn with_extra_option(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.get_or_insert_with(Map::new).insert(key.into(), value);
        self
    }

    /// Server URL as given
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Basic authentication username
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// Basic authentication password
    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }

    /// Extra HTTP client options
    pub fn extra(&self) -> Option<&Map<String, Value>> {
        self.extra.as_ref()
    }

    /// Parse and check the server URL.
    ///
    /// The URL must be non-empty, absolute and use the `http` or `https`
    /// scheme.
    pub fn base_url(&self) -> Result<Url, Error> {
        if self.url.is_empty() {
            return Err(Error::ConfigError(r#"missing/invalid "url" option"#.to_string()));
        }

        let url = Url::parse(&self.url)?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(Error::ConfigError(format!(
                "Invalid URL scheme: {}. Expected http or https",
                url.scheme()
            )));
        }

        Ok(url)
    }

    /// Credentials to authenticate with, when both are set and non-empty
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (self.username(), self.password()) {
            (Some(username), Some(password)) if !username.is_empty() && !password.is_empty() => {
                Some((username, password))
            }
            _ => None,
        }
    }

    /// Whether exactly one half of the credentials is usable
    pub(crate) fn has_partial_credentials(&self) -> bool {
        let username = self.username().is_some_and(|u| !u.is_empty());
        let password = self.password().is_some_and(|p| !p.is_empty());
        username != password
    }
}

fn optional_string(value: Option<Value>, name: &str) -> Result<Option<String>, Error> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(value)) => Ok(Some(value)),
        Some(_) => Err(Error::ConfigError(format!(r#"invalid "{}" option"#, name))),
    }
}
