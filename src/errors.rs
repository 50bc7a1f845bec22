use thiserror::Error;

#[derive(Error, Debug)]
pub enum IapValidatorError {
    /// The shared secret could not be resolved at construction time. The
    /// verifyReceipt endpoint requires it for any auto-renewing-subscription
    /// receipt, so a missing secret is a deployment misconfiguration rather
    /// than something to silently skip.
    #[error("Configuration error: {0}.")]
    Configuration(String),

    #[error("Invalid input: {0}.")]
    InvalidInput(String),

    #[error("Receipt data is not provided.")]
    MissingReceipt,

    /// The callout failed to send, or returned with a non-200 HTTP status
    /// code. Vendor business statuses (21000-21199) are carried in
    /// [`ReceiptResponse::status_code`] instead, and are never an error.
    ///
    /// [`ReceiptResponse::status_code`]:
    ///     crate::domain::entities::receipt_response::ReceiptResponse
    #[error("Callout to iTunes server failed: {detail}.")]
    TransportFailure { status: Option<u16>, detail: String },

    #[error("Malformed verify-receipt response: {0}.")]
    MalformedResponse(String),
}
