//! Single-shot HTTP request executor.

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::NetError;

/// HTTP methods the executor knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    /// Parse a method name case-insensitively; anything unknown is `Post`.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "get" => HttpMethod::Get,
            "put" => HttpMethod::Put,
            "patch" => HttpMethod::Patch,
            "delete" => HttpMethod::Delete,
            _ => HttpMethod::Post,
        }
    }

    /// Whether the request body is sent for this method.
    pub fn sends_body(&self) -> bool {
        !matches!(self, HttpMethod::Get | HttpMethod::Delete)
    }

    fn as_reqwest(&self) -> reqwest::Method {
        match self {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpMethod::Get => write!(f, "GET"),
            HttpMethod::Post => write!(f, "POST"),
            HttpMethod::Put => write!(f, "PUT"),
            HttpMethod::Patch => write!(f, "PATCH"),
            HttpMethod::Delete => write!(f, "DELETE"),
        }
    }
}

/// Parameters of a single HTTP request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HttpRequest {
    /// Target URL.
    pub url: String,
    /// Method name: get, post, put, patch, delete. Empty means post.
    #[serde(default)]
    pub method: String,
    /// Request headers.
    #[serde(default)]
    pub header: HashMap<String, String>,
    /// Request body (ignored for get and delete).
    #[serde(default)]
    pub body: String,
    /// Whole-request timeout in seconds; 0 disables it.
    #[serde(default)]
    pub timeout: u64,
}

impl HttpRequest {
    pub fn method(&self) -> HttpMethod {
        HttpMethod::from_name(&self.method)
    }
}

/// A fully received HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    /// First header value with the given name (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Trait for anything that can perform a single HTTP request.
#[async_trait]
pub trait RequestExecutor: Send + Sync {
    async fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, NetError>;
}

/// reqwest-backed executor.
///
/// A fresh client is built per request with the request's timeout, and TLS
/// certificate verification is disabled.
#[derive(Debug, Default, Clone, Copy)]
pub struct HttpExecutor;

impl HttpExecutor {
    pub fn new() -> Self {
        Self
    }

    fn client(timeout_secs: u64) -> Result<reqwest::Client, NetError> {
        let mut builder = reqwest::Client::builder().danger_accept_invalid_certs(true);
        if timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(timeout_secs));
        }
        builder.build().map_err(|e| NetError::Client(e.to_string()))
    }
}

#[async_trait]
impl RequestExecutor for HttpExecutor {
    #[instrument(skip(self, request), fields(url = %request.url, method = %request.method()))]
    async fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, NetError> {
        let method = request.method();
        let headers = make_header(&request.header)?;
        let client = Self::client(request.timeout)?;

        let mut builder = client.request(method.as_reqwest(), &request.url).headers(headers);
        if method.sends_body() {
            builder = builder.body(request.body.clone());
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                NetError::Timeout(request.timeout)
            } else if e.is_builder() {
                NetError::InvalidRequest {
                    method: method.to_string(),
                    message: e.to_string(),
                }
            } else {
                NetError::Http {
                    method: method.to_string(),
                    message: e.to_string(),
                }
            }
        })?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(k, v)| {
                (
                    k.as_str().to_string(),
                    String::from_utf8_lossy(v.as_bytes()).into_owned(),
                )
            })
            .collect();

        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                NetError::Timeout(request.timeout)
            } else {
                NetError::Http {
                    method: method.to_string(),
                    message: format!("failed to read body: {e}"),
                }
            }
        })?;

        tracing::debug!("{method} {} -> {status}", request.url);

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

/// Build a header map from plain name/value pairs.
pub fn make_header(headers: &HashMap<String, String>) -> Result<HeaderMap, NetError> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        let header_name =
            HeaderName::from_bytes(name.as_bytes()).map_err(|e| NetError::InvalidHeader {
                name: name.clone(),
                message: e.to_string(),
            })?;
        let header_value = HeaderValue::from_str(value).map_err(|e| NetError::InvalidHeader {
            name: name.clone(),
            message: e.to_string(),
        })?;
        map.append(header_name, header_value);
    }
    Ok(map)
}
