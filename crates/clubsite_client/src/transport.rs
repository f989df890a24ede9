use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, CONTENT_TYPE};
use serde_json::Value;

use crate::error::RequestError;
use crate::request::PreparedRequest;
use crate::settings::ClientSettings;

/// Status and decoded body of a completed exchange.
///
/// `body` is `None` when the payload was not valid JSON; the status code
/// decides whether that is a decode failure or an undecodable error body.
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Option<Value>,
}

/// Seam between `Resource` and the actual HTTP stack.
#[async_trait::async_trait]
pub trait HttpSend: Send + Sync {
    async fn send(&self, request: PreparedRequest) -> Result<RawResponse, RequestError>;
}

/// Production transport built on `reqwest`.
#[derive(Debug, Clone)]
pub struct ReqwestSender {
    client: reqwest::Client,
}

impl ReqwestSender {
    pub fn new(settings: &ClientSettings) -> Result<Self, RequestError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| RequestError::Network(err.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait::async_trait]
impl HttpSend for ReqwestSender {
    async fn send(&self, request: PreparedRequest) -> Result<RawResponse, RequestError> {
        let mut builder = self
            .client
            .request(request.method.clone(), request.url.clone())
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .header(ACCEPT_LANGUAGE, request.language.code());
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(map_reqwest_error)?;
        let status = response.status().as_u16();
        let body = response.json::<Value>().await.ok();
        Ok(RawResponse { status, body })
    }
}

fn map_reqwest_error(err: reqwest::Error) -> RequestError {
    if err.is_timeout() {
        return RequestError::Timeout;
    }
    RequestError::Network(err.to_string())
}
