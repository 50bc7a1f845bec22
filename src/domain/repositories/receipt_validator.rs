use async_trait::async_trait;

use crate::{
    domain::entities::{endpoint::Endpoint, receipt_response::ReceiptResponse},
    errors::IapValidatorError,
};

/// A per-validation-session receipt validator.
///
/// Not safe for concurrent reuse: the endpoint and receipt-data fields are
/// mutated during [`validate`](Self::validate). Callers needing concurrent
/// validations must use independent instances.
#[async_trait]
pub trait ReceiptValidator: Send + Sync {
    /// Validates the given base64 receipt blob against the resolved
    /// endpoint (explicit argument, previously configured endpoint, or
    /// Production, in that order), applying the vendor's environment
    /// fallback protocol: at most one retry against the other environment
    /// when the vendor reports 21007/21008, whose result is final.
    async fn validate(
        &mut self,
        receipt_data: &str,
        endpoint: Option<Endpoint>,
    ) -> Result<ReceiptResponse, IapValidatorError>;

    fn set_receipt_data(&mut self, receipt_data: &str) -> Result<(), IapValidatorError>;

    fn set_endpoint(&mut self, endpoint: &str) -> Result<(), IapValidatorError>;

    /// Serializes the verifyReceipt request body. The `password` key is
    /// omitted entirely when no shared secret is configured.
    fn encode_request(&self) -> Result<String, IapValidatorError>;

    fn shared_secret(&self) -> Option<&str>;

    fn receipt_data(&self) -> &str;

    /// The endpoint last targeted, if any.
    fn endpoint(&self) -> Option<Endpoint>;
}
