//! The `quizclock http` command.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use quizclock_net::{HttpExecutor, HttpRequest, RequestExecutor};

pub async fn execute(
    url: Option<String>,
    method: String,
    headers: Vec<String>,
    body: String,
    timeout: u64,
    request_path: Option<PathBuf>,
) -> Result<()> {
    let request = match request_path {
        Some(path) => load_request(&path)?,
        None => {
            let url = url.context("either --url or --request is required")?;
            HttpRequest {
                url,
                method,
                header: parse_headers(&headers)?,
                body,
                timeout,
            }
        }
    };

    let response = HttpExecutor::new().execute(&request).await?;

    println!("HTTP {}", response.status);
    println!("{}", response.body);
    Ok(())
}

fn load_request(path: &Path) -> Result<HttpRequest> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read request: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("failed to parse request: {}", path.display()))
}

fn parse_headers(raw: &[String]) -> Result<HashMap<String, String>> {
    raw.iter()
        .map(|h| {
            let (name, value) = h
                .split_once(':')
                .with_context(|| format!("invalid header '{h}', expected 'Name: value'"))?;
            Ok((name.trim().to_string(), value.trim().to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_header_pairs() {
        let headers = parse_headers(&["Content-Type: application/json".to_string()]).unwrap();
        assert_eq!(headers["Content-Type"], "application/json");
    }

    #[test]
    fn parse_header_without_colon() {
        assert!(parse_headers(&["nonsense".to_string()]).is_err());
    }
}
