use canteen_common::api::{self, ApiRequest, Method};
use canteen_common::config::ClientConfig;
use canteen_common::error::ApiError;
use canteen_common::user::{Credentials, User};

pub mod harness;

/// Executes [`ApiRequest`]s over real HTTP, the way the browser client does
/// with `fetch`.
#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    config: ClientConfig,
}

impl HttpTransport {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Send a request and return the HTTP status with the raw body.
    pub async fn send(&self, req: ApiRequest) -> Result<(u16, String), ApiError> {
        let url = self.config.url(&req.path);
        tracing::debug!("{} {}", req.method.as_str(), url);

        let method = match req.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        };
        let mut builder = self.client.request(method, &url);
        if let Some(body) = req.body {
            builder = builder
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(body);
        }

        let resp = builder
            .send()
            .await
            .map_err(|e| ApiError::Network(format!("{url}: {e}")))?;
        let status = resp.status().as_u16();
        let body = resp
            .text()
            .await
            .map_err(|e| ApiError::Network(format!("Failed to read body: {e}")))?;
        Ok((status, body))
    }

    /// Log in and return the session user.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, ApiError> {
        let credentials = Credentials {
            email: email.to_string(),
            password: password.to_string(),
        };
        let (status, body) = self.send(ApiRequest::login(&credentials)?).await?;
        api::decode_auth(status, &body).map(|(user, _)| user)
    }
}
