//! The `quizclock tcp` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use quizclock_net::{TcpClient, TcpExchanger, TcpRequest};

pub async fn execute(
    address: Option<String>,
    body: String,
    timeout: u64,
    max_read: usize,
    request_path: Option<PathBuf>,
) -> Result<()> {
    let request = match request_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read request: {}", path.display()))?;
            serde_json::from_str::<TcpRequest>(&content)
                .with_context(|| format!("failed to parse request: {}", path.display()))?
        }
        None => {
            let address = address.context("either --address or --request is required")?;
            TcpRequest {
                timeout,
                max_read_package_size: max_read,
                ..TcpRequest::new(address, body)
            }
        }
    };

    let response = send(&TcpClient::new(), &request).await?;
    println!("{response}");
    Ok(())
}

async fn send(exchanger: &dyn TcpExchanger, request: &TcpRequest) -> Result<String> {
    anyhow::ensure!(
        request.max_read_package_size > 0,
        "max read size must be at least 1 byte"
    );
    let response = exchanger.exchange(request).await?;
    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use quizclock_net::mock::MockTcpExchanger;

    #[tokio::test]
    async fn send_passes_request_through() {
        let mock = MockTcpExchanger::with_fixed_response("0810OK");
        let request = TcpRequest {
            max_read_package_size: 4,
            ..TcpRequest::new("10.0.0.1:9000", "0800")
        };

        let response = send(&mock, &request).await.unwrap();
        assert_eq!(response, "0810");
        assert_eq!(mock.call_count(), 1);

        let seen = mock.last_request().unwrap();
        assert_eq!(seen.address, "10.0.0.1:9000");
        assert_eq!(seen.body, "0800");
    }

    #[tokio::test]
    async fn send_rejects_zero_read_size() {
        let mock = MockTcpExchanger::with_fixed_response("unused");
        let request = TcpRequest {
            max_read_package_size: 0,
            ..TcpRequest::new("10.0.0.1:9000", "0800")
        };

        let err = send(&mock, &request).await.unwrap_err();
        assert!(err.to_string().contains("at least 1 byte"));
        assert_eq!(mock.call_count(), 0);
    }
}
