use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;

use crate::errors::IapValidatorError;

/// Transport capability consumed by the validator: send a POST with a body
/// to a URL and return the HTTP status code plus raw response body.
///
/// Timeouts, connection pooling, and network-level retries are the
/// transport's concern; the validator only interprets the terminal
/// status and body.
#[async_trait]
pub(crate) trait VerifyReceiptDatasource: Send + Sync {
    async fn post(&self, url: &str, body: String) -> Result<(u16, String), IapValidatorError>;
}

#[derive(Debug)]
pub(crate) struct VerifyReceiptDatasourceImpl {
    client: reqwest::Client,
}

impl VerifyReceiptDatasourceImpl {
    pub(crate) fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl VerifyReceiptDatasource for VerifyReceiptDatasourceImpl {
    async fn post(&self, url: &str, body: String) -> Result<(u16, String), IapValidatorError> {
        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| IapValidatorError::TransportFailure {
                status: None,
                detail: format!("callout failed to send: {e:?}"),
            })?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| IapValidatorError::TransportFailure {
                status: Some(status),
                detail: format!("failed to read callout response: {e:?}"),
            })?;
        Ok((status, body))
    }
}
