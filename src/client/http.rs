use crate::client::error::{ClientError, Result};
use crate::client::traits::{ApiRequest, Method, Transport};
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde_json::Value;
use tracing::{debug, warn};

/// reqwest-backed transport rooted at `<backend origin>/api`.
///
/// No timeout and no retry: a hung backend hangs the call, a failed call fails.
pub struct HttpTransport {
    client: Client,
    api_root: String,
}

impl HttpTransport {
    /// Create a transport for the given backend origin, e.g. `https://homes.example.com`
    pub fn new(backend_url: &str) -> Result<Self> {
        let api_root = api_root(backend_url)?;

        let client = Client::builder()
            .user_agent(concat!("estate-scout/", env!("CARGO_PKG_VERSION")))
            .build()?;

        debug!("HTTP transport rooted at {}", api_root);
        Ok(Self { client, api_root })
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.api_root, path)
    }
}

/// Validate the origin and append the `/api` prefix
fn api_root(backend_url: &str) -> Result<String> {
    let invalid = |reason: String| ClientError::InvalidUrl {
        url: backend_url.to_string(),
        reason,
    };

    let trimmed = backend_url.trim().trim_end_matches('/');
    let url = Url::parse(trimmed).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }

    Ok(format!("{}/api", trimmed))
}

/// Pull the human message out of an error body (`{"detail": ...}`), or use the raw text
fn error_detail(body: &str) -> String {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(map)) => match map.get("detail") {
            Some(Value::String(detail)) => detail.clone(),
            Some(other) => other.to_string(),
            None => body.to_string(),
        },
        _ => body.trim().to_string(),
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<Value> {
        let url = self.url_for(&request.path);
        debug!("{} {}", request.method, url);

        let mut builder = match request.method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
            Method::Put => self.client.put(&url),
            Method::Delete => self.client.delete(&url),
        };

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            let detail = error_detail(&String::from_utf8_lossy(&bytes));
            warn!("{} {} returned {}: {}", request.method, url, status, detail);
            return Err(ClientError::Status {
                status: status.as_u16(),
                detail,
            });
        }

        debug!("Received {} bytes from {}", bytes.len(), url);
        if bytes.is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_slice(&bytes)?)
    }

    fn base_url(&self) -> &str {
        &self.api_root
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};
    use tokio::task::JoinHandle;

    /// Answer one connection per canned response and hand back the raw requests
    async fn serve(responses: Vec<&'static str>) -> (String, JoinHandle<Vec<String>>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let mut requests = Vec::new();
            for response in responses {
                let (mut stream, _) = listener.accept().await.unwrap();
                requests.push(read_request(&mut stream).await);
                stream.write_all(response.as_bytes()).await.unwrap();
                stream.shutdown().await.unwrap();
            }
            requests
        });

        (format!("http://{}", addr), handle)
    }

    async fn read_request(stream: &mut TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = stream.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);

            let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") else {
                continue;
            };
            let head = String::from_utf8_lossy(&buf[..end]).to_lowercase();
            let length = head
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|v| v.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= end + 4 + length {
                break;
            }
        }
        String::from_utf8_lossy(&buf).into_owned()
    }

    #[tokio::test]
    async fn test_send_over_http() {
        let (backend, server) = serve(vec![
            "HTTP/1.1 400 Bad Request\r\nContent-Type: application/json\r\nContent-Length: 42\r\nConnection: close\r\n\r\n{\"detail\":\"Property already in favorites\"}",
            "HTTP/1.1 200 OK\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 17\r\nConnection: close\r\n\r\n{\"total_users\":3}",
        ])
        .await;
        let transport = HttpTransport::new(&backend).unwrap();

        let err = transport
            .send(ApiRequest::post("/favorites/p%201").bearer(Some("tok")))
            .await
            .unwrap_err();
        assert!(matches!(
            &err,
            ClientError::Status { status: 400, detail } if detail == "Property already in favorites"
        ));

        let empty = transport
            .send(ApiRequest::delete("/properties/p-1").bearer(Some("tok")))
            .await
            .unwrap();
        assert_eq!(empty, Value::Null);

        let body = transport
            .send(ApiRequest::get("/stats").query(vec![("limit".to_string(), "6".to_string())]))
            .await
            .unwrap();
        assert_eq!(body, json!({"total_users": 3}));

        let requests = server.await.unwrap();
        assert!(requests[0].starts_with("POST /api/favorites/p%201 HTTP/1.1\r\n"));
        assert!(requests[0].to_lowercase().contains("authorization: bearer tok\r\n"));
        assert!(requests[1].starts_with("DELETE /api/properties/p-1 HTTP/1.1\r\n"));
        assert!(requests[2].starts_with("GET /api/stats?limit=6 HTTP/1.1\r\n"));
        assert!(!requests[2].to_lowercase().contains("authorization:"));
    }

    #[test]
    fn test_api_root_appends_prefix() {
        assert_eq!(
            api_root("https://homes.example.com").unwrap(),
            "https://homes.example.com/api"
        );
        assert_eq!(
            api_root("http://localhost:8001/").unwrap(),
            "http://localhost:8001/api"
        );
    }

    #[test]
    fn test_api_root_rejects_bad_urls() {
        assert!(matches!(
            api_root("not a url"),
            Err(ClientError::InvalidUrl { .. })
        ));
        assert!(matches!(
            api_root("ftp://files.example.com"),
            Err(ClientError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn test_error_detail_extraction() {
        assert_eq!(error_detail(r#"{"detail":"Property not found"}"#), "Property not found");
        assert_eq!(
            error_detail(r#"{"detail":[{"msg":"field required"}]}"#),
            r#"[{"msg":"field required"}]"#
        );
        assert_eq!(error_detail("Bad Gateway\n"), "Bad Gateway");
    }

    #[test]
    fn test_transport_urls() {
        let transport = HttpTransport::new("http://localhost:8001").unwrap();
        assert_eq!(transport.base_url(), "http://localhost:8001/api");
        assert_eq!(
            transport.url_for("/properties/abc"),
            "http://localhost:8001/api/properties/abc"
        );
    }
}
