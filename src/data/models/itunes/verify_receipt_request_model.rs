use serde::Serialize;

/// Request body for the verifyReceipt endpoint:
/// https://developer.apple.com/documentation/appstorereceipts/requestbody
#[derive(Debug, Serialize)]
pub(crate) struct VerifyReceiptRequestModel<'a> {
    /// Base64-encoded receipt blob, passed through untransformed.
    #[serde(rename = "receipt-data")]
    pub(crate) receipt_data: &'a str,
    /// Vendor-issued shared secret. The key must be absent, not empty,
    /// when no secret is configured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) password: Option<&'a str>,
}
