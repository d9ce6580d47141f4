//! Mock exchanger for testing without network I/O.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::NetError;
use crate::tcp::{TcpExchanger, TcpRequest};

/// A TCP exchanger that answers from a table instead of dialing out.
pub struct MockTcpExchanger {
    /// Map of body substring → canned response.
    responses: HashMap<String, String>,
    /// Response if no body matches.
    default_response: String,
    call_count: AtomicU32,
    last_request: Mutex<Option<TcpRequest>>,
}

impl MockTcpExchanger {
    pub fn new(responses: HashMap<String, String>) -> Self {
        Self {
            responses,
            default_response: String::new(),
            call_count: AtomicU32::new(0),
            last_request: Mutex::new(None),
        }
    }

    /// A mock that always returns the same response.
    pub fn with_fixed_response(response: &str) -> Self {
        Self {
            responses: HashMap::new(),
            default_response: response.to_string(),
            call_count: AtomicU32::new(0),
            last_request: Mutex::new(None),
        }
    }

    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    pub fn last_request(&self) -> Option<TcpRequest> {
        self.last_request
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl TcpExchanger for MockTcpExchanger {
    async fn exchange(&self, request: &TcpRequest) -> Result<String, NetError> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        *self
            .last_request
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(request.clone());

        let response = self
            .responses
            .iter()
            .find(|(key, _)| request.body.contains(key.as_str()))
            .map(|(_, v)| v.clone())
            .unwrap_or_else(|| self.default_response.clone());

        // Truncate by bytes, like a single socket read.
        let bytes = response.as_bytes();
        let end = bytes.len().min(request.max_read_package_size);
        Ok(String::from_utf8_lossy(&bytes[..end]).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fixed_response() {
        let mock = MockTcpExchanger::with_fixed_response("0810OK");
        let response = mock
            .exchange(&TcpRequest::new("unused:0", "0800"))
            .await
            .unwrap();
        assert_eq!(response, "0810OK");
        assert_eq!(mock.call_count(), 1);
        assert_eq!(mock.last_request().unwrap().body, "0800");
    }

    #[tokio::test]
    async fn body_matching() {
        let mut responses = HashMap::new();
        responses.insert("balance".to_string(), "42".to_string());
        responses.insert("ping".to_string(), "pong".to_string());
        let mock = MockTcpExchanger::new(responses);

        let pong = mock.exchange(&TcpRequest::new("x:1", "ping")).await.unwrap();
        assert_eq!(pong, "pong");
        let none = mock.exchange(&TcpRequest::new("x:1", "other")).await.unwrap();
        assert_eq!(none, "");
        assert_eq!(mock.call_count(), 2);
    }

    #[tokio::test]
    async fn truncates_by_bytes() {
        let mock = MockTcpExchanger::with_fixed_response("héllo");
        let request = TcpRequest {
            max_read_package_size: 3,
            ..TcpRequest::new("x:1", "ping")
        };
        let response = mock.exchange(&request).await.unwrap();
        // "h" plus the two bytes of "é".
        assert_eq!(response, "hé");

        let request = TcpRequest {
            max_read_package_size: 2,
            ..TcpRequest::new("x:1", "ping")
        };
        let response = mock.exchange(&request).await.unwrap();
        assert_eq!(response, "h\u{FFFD}");
    }
}
