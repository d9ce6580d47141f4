//! Single-shot TCP request/response exchanger.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::instrument;

use crate::error::NetError;

/// Parameters of a single TCP exchange.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TcpRequest {
    /// `host:port` to dial.
    pub address: String,
    /// Informational only; the payload is sent as-is.
    #[serde(default)]
    pub content_type: String,
    /// Payload written after connecting.
    #[serde(default)]
    pub body: String,
    /// Connect and read timeout in seconds; 0 disables it.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// Upper bound on the bytes taken from the single response read.
    #[serde(default = "default_max_read")]
    pub max_read_package_size: usize,
}

fn default_timeout() -> u64 {
    30
}

fn default_max_read() -> usize {
    4096
}

impl TcpRequest {
    pub fn new(address: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            content_type: String::new(),
            body: body.into(),
            timeout: default_timeout(),
            max_read_package_size: default_max_read(),
        }
    }
}

/// Trait for anything that can perform one write-then-read TCP exchange.
#[async_trait]
pub trait TcpExchanger: Send + Sync {
    async fn exchange(&self, request: &TcpRequest) -> Result<String, NetError>;
}

/// tokio-backed exchanger. The connection is closed when the call returns.
#[derive(Debug, Default, Clone, Copy)]
pub struct TcpClient;

impl TcpClient {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl TcpExchanger for TcpClient {
    #[instrument(skip(self, request), fields(address = %request.address))]
    async fn exchange(&self, request: &TcpRequest) -> Result<String, NetError> {
        let mut stream = within(request.timeout, TcpStream::connect(&request.address))
            .await?
            .map_err(|e| NetError::Connect {
                address: request.address.clone(),
                message: e.to_string(),
            })?;

        stream
            .write_all(request.body.as_bytes())
            .await
            .map_err(|e| NetError::Write(e.to_string()))?;

        let mut buf = vec![0u8; request.max_read_package_size];
        let read = within(request.timeout, stream.read(&mut buf))
            .await?
            .map_err(|e| NetError::Read(e.to_string()))?;

        tracing::debug!("read {read} bytes from {}", request.address);
        Ok(String::from_utf8_lossy(&buf[..read]).into_owned())
    }
}

async fn within<F: Future>(secs: u64, fut: F) -> Result<F::Output, NetError> {
    if secs == 0 {
        return Ok(fut.await);
    }
    tokio::time::timeout(Duration::from_secs(secs), fut)
        .await
        .map_err(|_| NetError::Timeout(secs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::TcpListener;

    /// Replies `ACK:<payload>` to the first read of each connection.
    async fn ack_server() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap().to_string();
        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                tokio::spawn(async move {
                    let mut buf = [0u8; 1024];
                    let n = socket.read(&mut buf).await.unwrap_or(0);
                    let mut reply = b"ACK:".to_vec();
                    reply.extend_from_slice(&buf[..n]);
                    let _ = socket.write_all(&reply).await;
                });
            }
        });
        addr
    }

    #[tokio::test]
    async fn exchange_round_trip() {
        let addr = ack_server().await;
        let response = TcpClient::new()
            .exchange(&TcpRequest::new(&addr, "0800"))
            .await
            .unwrap();
        assert_eq!(response, "ACK:0800");
    }

    #[tokio::test]
    async fn response_truncated_to_max_read() {
        let addr = ack_server().await;
        let mut request = TcpRequest::new(&addr, "payload");
        request.max_read_package_size = 4;

        let response = TcpClient::new().exchange(&request).await.unwrap();
        assert_eq!(response, "ACK:");
    }

    #[tokio::test]
    async fn connection_refused() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap().to_string();
        drop(listener);

        let err = TcpClient::new()
            .exchange(&TcpRequest::new(&addr, "ping"))
            .await
            .unwrap_err();
        assert!(matches!(err, NetError::Connect { .. }), "unexpected: {err}");
        assert!(err.to_string().starts_with("Dial:"));
    }

    #[tokio::test]
    async fn silent_server_times_out() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap().to_string();
        tokio::spawn(async move {
            let (socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(5)).await;
            drop(socket);
        });

        let mut request = TcpRequest::new(&addr, "ping");
        request.timeout = 1;

        let err = TcpClient::new().exchange(&request).await.unwrap_err();
        assert!(err.is_timeout(), "unexpected: {err}");
    }

    #[test]
    fn request_defaults_from_json() {
        let request: TcpRequest =
            serde_json::from_str(r#"{"address": "localhost:9000", "body": "hi"}"#).unwrap();
        assert_eq!(request.timeout, 30);
        assert_eq!(request.max_read_package_size, 4096);
        assert!(request.content_type.is_empty());
    }
}
