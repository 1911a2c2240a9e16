//! Low-level request executor

use crate::client::response::{ApiResponse, ResponseBody};
use crate::error::Result;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Method};
use serde_json::Value;
use tracing::{debug, info};

/// Sends one request and decodes the reply
///
/// No retries and no timeout beyond the transport defaults.
#[derive(Debug, Clone)]
pub struct RequestExecutor {
    http: Client,
    base_url: String,
    dump_responses: bool,
}

impl RequestExecutor {
    pub fn new(base_url: &str, dump_responses: bool) -> Result<Self> {
        let http = Client::builder()
            .user_agent(concat!("zojnik-client/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            dump_responses,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL for an API path
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Issue `method` on `base_url + path`
    ///
    /// Server-side failures come back as ordinary responses; only transport
    /// failures are errors.
    pub async fn execute(
        &self,
        method: Method,
        path: &str,
        mut headers: HeaderMap,
        body: Option<&Value>,
    ) -> Result<ApiResponse> {
        let url = self.url(path);
        let mut request = self.http.request(method.clone(), &url);

        if let Some(body) = body {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
            request = request.json(body);
        }

        debug!(method = %method, path, "Sending request");

        let response = request.headers(headers).send().await?;
        let status = response.status().as_u16();
        let bytes = response.bytes().await?;
        let body = ResponseBody::decode(&bytes);

        if self.dump_responses {
            dump(&method, path, status, &body);
        }

        Ok(ApiResponse { status, body })
    }

    pub async fn get(&self, path: &str, headers: HeaderMap) -> Result<ApiResponse> {
        self.execute(Method::GET, path, headers, None).await
    }

    pub async fn post(&self, path: &str, headers: HeaderMap, body: &Value) -> Result<ApiResponse> {
        self.execute(Method::POST, path, headers, Some(body)).await
    }

    pub async fn patch(&self, path: &str, headers: HeaderMap, body: &Value) -> Result<ApiResponse> {
        self.execute(Method::PATCH, path, headers, Some(body)).await
    }
}

fn dump(method: &Method, path: &str, status: u16, body: &ResponseBody) {
    info!(method = %method, path, status, "Response");
    for line in body.render_lines() {
        info!(target: "zojnik_client::response", "{}", line);
    }
}
