//! Blocking HTTP client backed by reqwest.

use std::io;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;

use crate::infrastructure::error::{InfraError, InfraResult};
use crate::infrastructure::traits::{HttpClient, HttpRequest, HttpResponse};

#[derive(Debug, Clone)]
pub struct ReqwestClient {
    client: Client,
}

impl ReqwestClient {
    pub fn new(timeout: Duration) -> InfraResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| InfraError::Http {
                message: format!("build client: {e}"),
            })?;
        Ok(Self { client })
    }
}

impl HttpClient for ReqwestClient {
    fn post_json(&self, request: &HttpRequest) -> io::Result<HttpResponse> {
        let response = self
            .client
            .post(&request.url)
            .bearer_auth(&request.bearer_token)
            .header(CONTENT_TYPE, "application/json")
            .body(request.body.clone())
            .send()
            .map_err(io::Error::other)?;

        let status = response.status().as_u16();
        let body = response.text().map_err(io::Error::other)?;
        Ok(HttpResponse { status, body })
    }
}
