//! Effective HTTP client options
//!
//! The options a transport builds its client from are the defaults merged
//! with the caller's extra options, after which the reserved keys are forced
//! back to what the transport needs.

use std::collections::BTreeMap;
use std::time::Duration;

use log::{debug, warn};
use reqwest::header::{self, HeaderMap, HeaderName, HeaderValue};
use reqwest::{redirect, Client as HttpClient, Proxy};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use url::Url;

use crate::config::{TransportConfig, RESERVED_OPTIONS};
use crate::error::Error;
use crate::utils::{basic_authorization, merge_json_objects};

/// Default request timeout in milliseconds
pub const DEFAULT_TIMEOUT_MS: u64 = 60_000;

/// Proxy setting: a proxy URL, or `false` to ignore the system proxy
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub(crate) enum ProxyOption {
    Url(String),
    Enabled(bool),
}

/// HTTP client options after merging defaults, extra options and reserved keys
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct HttpClientOptions {
    pub base_url: String,
    pub json: bool,
    pub timeout: u64,
    pub connect_timeout: Option<u64>,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    pub user_agent: Option<String>,
    pub proxy: Option<ProxyOption>,
    pub max_redirects: Option<usize>,
    pub reject_unauthorized: Option<bool>,
    pub pool_idle_timeout: Option<u64>,
    pub pool_max_idle_per_host: Option<usize>,
    #[serde(flatten)]
    pub unrecognized: Map<String, Value>,
}

impl HttpClientOptions {
    /// Resolve the effective options for a configuration
    pub fn resolve(config: &TransportConfig, base_url: &Url) -> Result<Self, Error> {
        let mut effective = json!({
            "timeout": DEFAULT_TIMEOUT_MS,
            "headers": {},
        });

        if let Some(extra) = config.extra() {
            for key in RESERVED_OPTIONS {
                if extra.contains_key(*key) {
                    warn!("Ignoring reserved {:?} extra option", key);
                }
            }
            let mut extra = extra.clone();
            if extra.get("headers").is_some_and(Value::is_null) {
                extra.remove("headers");
            }
            merge_json_objects(&mut effective, &Value::Object(extra));
        }

        if let Value::Object(options) = &mut effective {
            options.insert("baseUrl".to_string(), Value::String(base_url.to_string()));
            options.insert("json".to_string(), Value::Bool(true));

            if let Some((username, password)) = config.credentials() {
                if let Some(Value::Object(headers)) = options.get_mut("headers") {
                    headers.retain(|name, _| !name.eq_ignore_ascii_case("authorization"));
                    headers.insert(
                        "Authorization".to_string(),
                        Value::String(basic_authorization(username, password)),
                    );
                }
            }
        }

        let options: Self = serde_json::from_value(effective)
            .map_err(|e| Error::ConfigError(format!("invalid extra options: {}", e)))?;

        for key in options.unrecognized.keys() {
            debug!("Passing over unsupported HTTP client option {:?}", key);
        }

        Ok(options)
    }

    /// Endpoint every request is posted to: the root path under the base URL
    pub fn endpoint(&self) -> Result<Url, Error> {
        let mut url = Url::parse(&self.base_url)?;
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(url)
    }

    /// Default headers sent with every request
    pub fn default_headers(&self) -> Result<HeaderMap, Error> {
        let mut headers = HeaderMap::new();

        for (name, value) in &self.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| Error::ConfigError(format!("invalid header name {:?}: {}", name, e)))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| Error::ConfigError(format!("invalid value for header {}: {}", name, e)))?;
            headers.insert(name, value);
        }

        if self.json {
            headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
            headers
                .entry(header::ACCEPT)
                .or_insert(HeaderValue::from_static("application/json"));
        }

        Ok(headers)
    }

    /// Build the HTTP client
    pub fn build_client(&self, headers: HeaderMap) -> Result<HttpClient, Error> {
        let mut builder = HttpClient::builder().default_headers(headers);

        if self.timeout > 0 {
            builder = builder.timeout(Duration::from_millis(self.timeout));
        }
        if let Some(timeout) = self.connect_timeout {
            builder = builder.connect_timeout(Duration::from_millis(timeout));
        }
        if let Some(user_agent) = &self.user_agent {
            builder = builder.user_agent(user_agent.as_str());
        }

        match &self.proxy {
            Some(ProxyOption::Url(url)) => {
                let proxy = Proxy::all(url.as_str())
                    .map_err(|e| Error::ConfigError(format!(r#"invalid "proxy" option: {}"#, e)))?;
                builder = builder.proxy(proxy);
            }
            Some(ProxyOption::Enabled(false)) => {
                builder = builder.no_proxy();
            }
            Some(ProxyOption::Enabled(true)) | None => {}
        }

        if let Some(max_redirects) = self.max_redirects {
            builder = builder.redirect(if max_redirects == 0 {
                redirect::Policy::none()
            } else {
                redirect::Policy::limited(max_redirects)
            });
        }
        if let Some(reject_unauthorized) = self.reject_unauthorized {
            builder = builder.danger_accept_invalid_certs(!reject_unauthorized);
        }
        if let Some(timeout) = self.pool_idle_timeout {
            builder = builder.pool_idle_timeout(Duration::from_millis(timeout));
        }
        if let Some(max_idle) = self.pool_max_idle_per_host {
            builder = builder.pool_max_idle_per_host(max_idle);
        }

        builder
            .build()
            .map_err(|e| Error::ConfigError(format!("Failed to create HTTP client: {}", e)))
    }
}
