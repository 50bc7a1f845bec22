use async_trait::async_trait;
use serde_json::Value;

use crate::{
    data::{
        datasources::verify_receipt_datasource::VerifyReceiptDatasource,
        models::itunes::verify_receipt_request_model::VerifyReceiptRequestModel,
    },
    domain::{
        entities::{endpoint::Endpoint, receipt_response::ReceiptResponse},
        repositories::receipt_validator::ReceiptValidator,
    },
    errors::IapValidatorError,
};

#[derive(Debug)]
pub(crate) struct ReceiptValidatorImpl<D: VerifyReceiptDatasource> {
    datasource: D,
    shared_secret: Option<String>,
    receipt_data: String,
    endpoint: Option<Endpoint>,
}

impl<D: VerifyReceiptDatasource> ReceiptValidatorImpl<D> {
    pub(crate) fn new(datasource: D, shared_secret: Option<String>) -> Self {
        Self {
            datasource,
            shared_secret,
            receipt_data: String::new(),
            endpoint: None,
        }
    }

    /// One POST to the given endpoint, interpreted into a
    /// [`ReceiptResponse`]. Non-200 HTTP statuses and non-JSON bodies are
    /// fatal; vendor business statuses are data.
    async fn round_trip(
        &mut self,
        endpoint: Endpoint,
    ) -> Result<ReceiptResponse, IapValidatorError> {
        self.endpoint = Some(endpoint);
        let body = self.encode_request()?;
        let (status, response_body) = self.datasource.post(endpoint.url(), body).await?;
        if status != 200 {
            tracing::warn!(
                status,
                url = endpoint.url(),
                "verify-receipt callout returned non-200 status code"
            );
            return Err(IapValidatorError::TransportFailure {
                status: Some(status),
                detail: "unable to get response from iTunes server".to_string(),
            });
        }
        let raw: Value = serde_json::from_str(&response_body).map_err(|e| {
            IapValidatorError::MalformedResponse(format!("failed to decode response body: {e}"))
        })?;
        ReceiptResponse::parse(&raw)
    }
}

/// Maps a wrong-environment status to the endpoint the receipt should be
/// retried against. 21007 only redirects away from Production, 21008 only
/// away from Sandbox.
fn redirect_target(endpoint: Endpoint, status_code: i64) -> Option<Endpoint> {
    match (endpoint, status_code) {
        (Endpoint::Production, ReceiptResponse::SANDBOX_RECEIPT_SENT_TO_PRODUCTION) => {
            Some(Endpoint::Sandbox)
        }
        (Endpoint::Sandbox, ReceiptResponse::PRODUCTION_RECEIPT_SENT_TO_SANDBOX) => {
            Some(Endpoint::Production)
        }
        _ => None,
    }
}

#[async_trait]
impl<D: VerifyReceiptDatasource> ReceiptValidator for ReceiptValidatorImpl<D> {
    async fn validate(
        &mut self,
        receipt_data: &str,
        endpoint: Option<Endpoint>,
    ) -> Result<ReceiptResponse, IapValidatorError> {
        self.set_receipt_data(receipt_data)?;
        if let Some(endpoint) = endpoint {
            self.endpoint = Some(endpoint);
        }
        let first_target = self.endpoint.unwrap_or(Endpoint::Production);

        let first = self.round_trip(first_target).await?;
        let Some(redirect) = redirect_target(first_target, first.status_code) else {
            return Ok(first);
        };

        // Bounded to exactly one redirect: the retried endpoint's answer is
        // final even if it carries the opposite wrong-environment code.
        tracing::debug!(
            from = %first_target,
            to = %redirect,
            "receipt was sent to the wrong environment, retrying"
        );
        self.round_trip(redirect).await
    }

    fn set_receipt_data(&mut self, receipt_data: &str) -> Result<(), IapValidatorError> {
        if receipt_data.is_empty() {
            return Err(IapValidatorError::InvalidInput(
                "receipt data should not be empty or null".to_string(),
            ));
        }
        self.receipt_data = receipt_data.to_owned();
        Ok(())
    }

    fn set_endpoint(&mut self, endpoint: &str) -> Result<(), IapValidatorError> {
        self.endpoint = Some(endpoint.parse()?);
        Ok(())
    }

    fn encode_request(&self) -> Result<String, IapValidatorError> {
        if self.receipt_data.is_empty() {
            return Err(IapValidatorError::MissingReceipt);
        }
        let request = VerifyReceiptRequestModel {
            receipt_data: &self.receipt_data,
            password: self.shared_secret.as_deref(),
        };
        serde_json::to_string(&request).map_err(|e| {
            IapValidatorError::InvalidInput(format!("failed to encode request body: {e}"))
        })
    }

    fn shared_secret(&self) -> Option<&str> {
        self.shared_secret.as_deref()
    }

    fn receipt_data(&self) -> &str {
        &self.receipt_data
    }

    fn endpoint(&self) -> Option<Endpoint> {
        self.endpoint
    }
}
