//! The single configured backend client.
//!
//! Every accessor goes through [`ApiClient::call`], which is the only place a
//! bearer token is attached.

use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult};
use crate::protocol::ApiRequest;
use crate::request::{HttpRequest, HttpTransport};
use crate::session::TokenSource;
use crate::HEADER_AUTHORIZATION;

#[derive(Debug, Clone)]
pub struct ApiClient<T, S> {
    config: ClientConfig,
    transport: T,
    tokens: S,
}

impl<T: HttpTransport, S: TokenSource> ApiClient<T, S> {
    pub fn new(config: ClientConfig, transport: T, tokens: S) -> Self {
        Self {
            config,
            transport,
            tokens,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Assembles the request for `req`, including credentials.
    pub fn build<R: ApiRequest>(&self, req: &R) -> ApiResult<HttpRequest> {
        let mut http = HttpRequest::new(&self.url_for(req), R::METHOD)
            .with_credentials(self.config.credentials)
            .with_body(req.body()?);

        if let Some(token) = self.tokens.bearer_token() {
            http = http.with_header(HEADER_AUTHORIZATION, &format!("Bearer {}", token));
        }
        Ok(http)
    }

    /// Performs one round trip and decodes the body.
    pub async fn call<R: ApiRequest>(&self, req: &R) -> ApiResult<R::Response> {
        let http = self.build(req).map_err(|e| e.in_op(R::OPERATION))?;
        log::debug!("{} {}", http.method.as_str(), http.url);

        let resp = self
            .transport
            .send(http)
            .await
            .map_err(|e| e.in_op(R::OPERATION))?;

        if !resp.ok() {
            log::warn!("{} failed with status {}", R::OPERATION, resp.status);
            return Err(ApiError::from_status(resp.status, &resp.body).in_op(R::OPERATION));
        }

        // Some endpoints answer 2xx with an empty body.
        let body = if resp.body.trim().is_empty() {
            "null"
        } else {
            resp.body.as_str()
        };

        serde_json::from_str(body).map_err(|e| ApiError::from(e).in_op(R::OPERATION))
    }

    fn url_for<R: ApiRequest>(&self, req: &R) -> String {
        let url = self.config.url(&req.path());
        let params: Vec<String> = req
            .query()
            .into_iter()
            .filter_map(|(key, value)| {
                value.map(|v| format!("{}={}", key, urlencoding::encode(&v)))
            })
            .collect();

        if params.is_empty() {
            url
        } else {
            format!("{}?{}", url, params.join("&"))
        }
    }
}
