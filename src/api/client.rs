//! reqwest client for the zip-code lookup and registration endpoints

use super::traits::RegistrationApi;
use super::types::{parse_error_body, Address, ApiError, RegisterResponse};
use crate::config::FormConfig;
use crate::state::FormValues;
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::StatusCode;

/// Client for the remote endpoints used by the form
pub struct HttpRegistrationApi {
    http: reqwest::Client,
    lookup_base_url: String,
    registration_url: String,
}

impl HttpRegistrationApi {
    pub fn new(config: &FormConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self {
            http,
            lookup_base_url: config.lookup_base_url.clone(),
            registration_url: config.registration_url.clone(),
        })
    }

    fn lookup_url(&self, zipcode: &str) -> String {
        format!(
            "{}/api/cep/v1/{}",
            self.lookup_base_url.trim_end_matches('/'),
            zipcode
        )
    }
}

#[async_trait]
impl RegistrationApi for HttpRegistrationApi {
    async fn lookup_zipcode(&self, zipcode: &str) -> Result<Option<Address>, ApiError> {
        let url = self.lookup_url(zipcode);
        tracing::debug!("Looking up zip code at {url}");

        let response = self
            .http
            .get(&url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            tracing::info!("No address found for zip code {zipcode}");
            return Ok(None);
        }
        if !status.is_success() {
            return Err(ApiError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        let address: Address = serde_json::from_str(&body)?;
        Ok(Some(address))
    }

    async fn register(&self, payload: &FormValues) -> Result<RegisterResponse, ApiError> {
        tracing::info!("Submitting registration to {}", self.registration_url);

        let response = self
            .http
            .post(&self.registration_url)
            .header(ACCEPT, "application/json")
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Registration responded with {status}");
        if status.is_success() {
            return Ok(RegisterResponse::Accepted);
        }

        let body = response.text().await?;
        let errors = parse_error_body(&body)?;
        Ok(RegisterResponse::Rejected {
            status: status.as_u16(),
            errors,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::FieldName;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Serve one canned HTTP response on a loopback port and hand back the
    /// raw request that was received
    async fn serve_once(status_line: &str, body: &str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let response = format!(
            "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 4096];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
                if request_complete(&request) {
                    break;
                }
            }
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            String::from_utf8_lossy(&request).into_owned()
        });

        (format!("http://{addr}"), handle)
    }

    fn request_complete(raw: &[u8]) -> bool {
        let text = String::from_utf8_lossy(raw);
        let Some(header_end) = text.find("\r\n\r\n") else {
            return false;
        };
        let content_length = text[..header_end]
            .lines()
            .find_map(|l| {
                let (name, value) = l.split_once(':')?;
                name.eq_ignore_ascii_case("content-length")
                    .then(|| value.trim().parse::<usize>().ok())
                    .flatten()
            })
            .unwrap_or(0);
        raw.len() >= header_end + 4 + content_length
    }

    fn client_for(base: &str) -> HttpRegistrationApi {
        let config = FormConfig {
            lookup_base_url: base.to_string(),
            registration_url: format!("{base}/api/register-user/register"),
            ..Default::default()
        };
        HttpRegistrationApi::new(&config).unwrap()
    }

    #[test]
    fn test_lookup_url_trims_trailing_slash() {
        let client = client_for("https://brasilapi.com.br/");
        assert_eq!(
            client.lookup_url("01001000"),
            "https://brasilapi.com.br/api/cep/v1/01001000"
        );
    }

    #[tokio::test]
    async fn test_lookup_returns_address() {
        let (base, server) = serve_once(
            "200 OK",
            r#"{"cep":"01001000","state":"SP","city":"São Paulo","street":"Praça da Sé"}"#,
        )
        .await;
        let client = client_for(&base);

        let address = client.lookup_zipcode("01001000").await.unwrap().unwrap();
        assert_eq!(address.street, "Praça da Sé");
        assert_eq!(address.city, "São Paulo");

        let request = server.await.unwrap();
        assert!(request.starts_with("GET /api/cep/v1/01001000 "));
    }

    #[tokio::test]
    async fn test_lookup_not_found_is_none() {
        let (base, _server) = serve_once("404 Not Found", r#"{"message":"CEP não encontrado"}"#).await;
        let client = client_for(&base);
        assert!(client.lookup_zipcode("99999999").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_lookup_server_error_is_status_error() {
        let (base, _server) = serve_once("500 Internal Server Error", "{}").await;
        let client = client_for(&base);
        let err = client.lookup_zipcode("01001000").await.unwrap_err();
        assert!(matches!(err, ApiError::Status(500)));
    }

    #[tokio::test]
    async fn test_register_accepted_posts_json_payload() {
        let (base, server) = serve_once("201 Created", r#"{"id":1}"#).await;
        let client = client_for(&base);

        let mut values = FormValues::default();
        values.insert(FieldName::Email, "ana@example.com".into());
        values.insert(FieldName::Terms, true.into());

        let response = client.register(&values).await.unwrap();
        assert_eq!(response, RegisterResponse::Accepted);

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /api/register-user/register "));
        let body = &request[request.find("\r\n\r\n").unwrap() + 4..];
        let json: serde_json::Value = serde_json::from_str(body).unwrap();
        assert_eq!(json["email"], "ana@example.com");
        assert_eq!(json["terms"], true);
    }

    #[tokio::test]
    async fn test_register_rejected_maps_errors() {
        let (base, _server) = serve_once(
            "422 Unprocessable Entity",
            r#"{"errors":{"email":"E-mail inválido"}}"#,
        )
        .await;
        let client = client_for(&base);

        let response = client.register(&FormValues::default()).await.unwrap();
        match response {
            RegisterResponse::Rejected { status, errors } => {
                assert_eq!(status, 422);
                assert_eq!(errors.get("email").map(String::as_str), Some("E-mail inválido"));
            }
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_register_rejected_with_malformed_body_is_decode_error() {
        let (base, _server) = serve_once("500 Internal Server Error", "oops").await;
        let client = client_for(&base);
        let err = client.register(&FormValues::default()).await.unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = client_for(&format!("http://{addr}"));
        let err = client.lookup_zipcode("01001000").await.unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
    }
}
