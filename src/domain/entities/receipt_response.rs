use serde_json::Value;

use crate::errors::IapValidatorError;

/// Structured result of one verifyReceipt round-trip.
///
/// Only structural malformation of the outer envelope is an error;
/// vendor-reported business statuses (an expired subscription, an
/// unmatched shared secret, ...) are data, surfaced through
/// [`status_code`](Self::status_code) for the caller to interpret.
#[derive(Debug, Clone, PartialEq)]
pub struct ReceiptResponse {
    /// Vendor status code; `0` means success.
    pub status_code: i64,
    /// "Production" or "Sandbox", present only alongside a receipt.
    pub environment: Option<String>,
    /// Decoded receipt fields, present only on well-formed responses.
    pub receipt: Option<Value>,
    /// Individual purchase transactions, taken from `receipt.in_app` as-is.
    pub in_app: Option<Value>,
    pub latest_receipt_info: Option<Value>,
    pub latest_receipt: Option<String>,
    pub pending_renewal_info: Option<Value>,
}

impl ReceiptResponse {
    /// Receipt is validated successfully and everything went true.
    pub const RESULT_OK: i64 = 0;
    /// The App Store could not read the JSON object provided.
    pub const COULD_NOT_READ: i64 = 21000;
    /// The data in the receipt-data property was malformed or missing.
    pub const RECEIPT_DATA_MALFORMED_OR_MISSING: i64 = 21002;
    /// The receipt could not be authenticated.
    pub const RECEIPT_NOT_AUTHENTICATED: i64 = 21003;
    /// The shared secret provided does not match the shared secret on file
    /// for the account.
    pub const UNMATCHED_SHARED_SECRET: i64 = 21004;
    /// The receipt server is not currently available.
    pub const SERVER_NOT_AVAILABLE: i64 = 21005;
    /// The receipt is valid but the subscription has expired. The receipt
    /// data is still decoded and returned as part of the response.
    pub const SUBSCRIPTION_HAS_EXPIRED: i64 = 21006;
    /// The receipt is from the test environment, but it was sent to the
    /// production environment for verification.
    pub const SANDBOX_RECEIPT_SENT_TO_PRODUCTION: i64 = 21007;
    /// The receipt is from the production environment, but it was sent to
    /// the test environment for verification.
    pub const PRODUCTION_RECEIPT_SENT_TO_SANDBOX: i64 = 21008;
    /// The receipt could not be authorized. Treat this the same as if a
    /// purchase was never made.
    pub const RECEIPT_NOT_AUTHORIZED: i64 = 21010;
    /// Internal data access error, minimum value.
    pub const INTERNAL_DATA_ACCESS_ERROR_MIN: i64 = 21100;
    /// Internal data access error, maximum value.
    pub const INTERNAL_DATA_ACCESS_ERROR_MAX: i64 = 21199;

    /// Interprets a raw decoded response body. First match wins:
    ///
    /// 1. not a JSON object: `MalformedResponse`;
    /// 2. object `receipt` with array `receipt.in_app`: full extraction,
    ///    including the latest-receipt and pending-renewal fields;
    /// 3. `receipt` of any other shape: status, environment, and receipt,
    ///    with `in_app` passed through as-is when the key exists;
    /// 4. bare `status`: status only;
    /// 5. otherwise: status defaults to 21002.
    pub fn parse(raw: &Value) -> Result<Self, IapValidatorError> {
        let Some(map) = raw.as_object() else {
            return Err(IapValidatorError::MalformedResponse(
                "response body is not a JSON object".to_string(),
            ));
        };

        let status_code = map
            .get("status")
            .and_then(Value::as_i64)
            .unwrap_or(Self::RECEIPT_DATA_MALFORMED_OR_MISSING);
        let environment = map
            .get("environment")
            .and_then(Value::as_str)
            .map(str::to_owned);

        Ok(match map.get("receipt") {
            Some(receipt)
                if receipt.is_object()
                    && receipt.get("in_app").is_some_and(Value::is_array) =>
            {
                Self {
                    status_code,
                    environment,
                    receipt: Some(receipt.clone()),
                    in_app: receipt.get("in_app").cloned(),
                    latest_receipt_info: map.get("latest_receipt_info").cloned(),
                    latest_receipt: map
                        .get("latest_receipt")
                        .and_then(Value::as_str)
                        .map(str::to_owned),
                    pending_renewal_info: map.get("pending_renewal_info").cloned(),
                }
            }
            Some(receipt) => Self {
                status_code,
                environment,
                receipt: Some(receipt.clone()),
                in_app: receipt.get("in_app").cloned(),
                latest_receipt_info: None,
                latest_receipt: None,
                pending_renewal_info: None,
            },
            None if map.contains_key("status") => Self {
                status_code,
                environment: None,
                receipt: None,
                in_app: None,
                latest_receipt_info: None,
                latest_receipt: None,
                pending_renewal_info: None,
            },
            None => Self {
                status_code: Self::RECEIPT_DATA_MALFORMED_OR_MISSING,
                environment: None,
                receipt: None,
                in_app: None,
                latest_receipt_info: None,
                latest_receipt: None,
                pending_renewal_info: None,
            },
        })
    }

    pub fn is_ok(&self) -> bool {
        self.status_code == Self::RESULT_OK
    }

    /// True when the vendor signalled the receipt was sent to the wrong
    /// environment (21007 or 21008).
    pub fn is_environment_mismatch(&self) -> bool {
        self.status_code == Self::SANDBOX_RECEIPT_SENT_TO_PRODUCTION
            || self.status_code == Self::PRODUCTION_RECEIPT_SENT_TO_SANDBOX
    }

    pub fn is_internal_data_access_error(&self) -> bool {
        (Self::INTERNAL_DATA_ACCESS_ERROR_MIN..=Self::INTERNAL_DATA_ACCESS_ERROR_MAX)
            .contains(&self.status_code)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn non_object_bodies_are_malformed() {
        for raw in [json!(null), json!("ok"), json!(21002), json!([{"status": 0}])] {
            assert!(matches!(
                ReceiptResponse::parse(&raw),
                Err(IapValidatorError::MalformedResponse(_))
            ));
        }
    }

    #[test]
    fn status_only_body_sets_status_and_nothing_else() {
        let parsed = ReceiptResponse::parse(&json!({"status": 21006})).unwrap();
        assert_eq!(parsed.status_code, ReceiptResponse::SUBSCRIPTION_HAS_EXPIRED);
        assert_eq!(parsed.environment, None);
        assert_eq!(parsed.receipt, None);
        assert_eq!(parsed.in_app, None);
        assert_eq!(parsed.latest_receipt_info, None);
        assert_eq!(parsed.latest_receipt, None);
        assert_eq!(parsed.pending_renewal_info, None);
    }

    #[test]
    fn body_without_receipt_or_status_defaults_to_21002() {
        let parsed = ReceiptResponse::parse(&json!({"unexpected": true})).unwrap();
        assert_eq!(
            parsed.status_code,
            ReceiptResponse::RECEIPT_DATA_MALFORMED_OR_MISSING
        );
        assert_eq!(parsed.receipt, None);
        assert_eq!(parsed.in_app, None);
    }

    #[test]
    fn well_formed_receipt_extracts_in_app_unchanged() {
        let in_app = json!([
            {"product_id": "com.app.sub", "transaction_id": "1000000000000001"},
            {"product_id": "com.app.coins", "transaction_id": "1000000000000002"},
        ]);
        let raw = json!({
            "status": 0,
            "environment": "Production",
            "receipt": {"bundle_id": "com.app", "in_app": in_app},
            "latest_receipt_info": [{"product_id": "com.app.sub"}],
            "latest_receipt": "bGF0ZXN0",
            "pending_renewal_info": [{"auto_renew_status": "1"}],
        });
        let parsed = ReceiptResponse::parse(&raw).unwrap();
        assert!(parsed.is_ok());
        assert_eq!(parsed.environment.as_deref(), Some("Production"));
        assert_eq!(parsed.in_app, Some(in_app));
        assert_eq!(
            parsed.latest_receipt_info,
            Some(json!([{"product_id": "com.app.sub"}]))
        );
        assert_eq!(parsed.latest_receipt.as_deref(), Some("bGF0ZXN0"));
        assert_eq!(
            parsed.pending_renewal_info,
            Some(json!([{"auto_renew_status": "1"}]))
        );
    }

    #[test]
    fn receipt_without_in_app_array_skips_latest_fields() {
        // in_app is present but not a sequence, so the latest-receipt
        // fields must not be extracted even though they exist top-level.
        let raw = json!({
            "status": 0,
            "environment": "Sandbox",
            "receipt": {"bundle_id": "com.app", "in_app": "garbled"},
            "latest_receipt": "bGF0ZXN0",
        });
        let parsed = ReceiptResponse::parse(&raw).unwrap();
        assert_eq!(parsed.environment.as_deref(), Some("Sandbox"));
        assert_eq!(parsed.in_app, Some(json!("garbled")));
        assert_eq!(parsed.latest_receipt, None);
        assert_eq!(parsed.latest_receipt_info, None);
    }

    #[test]
    fn receipt_of_non_object_shape_is_passed_through() {
        let parsed =
            ReceiptResponse::parse(&json!({"status": 21003, "receipt": "opaque"})).unwrap();
        assert_eq!(parsed.status_code, ReceiptResponse::RECEIPT_NOT_AUTHENTICATED);
        assert_eq!(parsed.receipt, Some(json!("opaque")));
        assert_eq!(parsed.in_app, None);
    }

    #[test]
    fn internal_data_access_error_range() {
        for (code, expected) in [(21099, false), (21100, true), (21150, true), (21199, true), (21200, false)] {
            let parsed = ReceiptResponse::parse(&json!({"status": code})).unwrap();
            assert_eq!(parsed.is_internal_data_access_error(), expected, "code {code}");
        }
    }

    #[test]
    fn environment_mismatch_codes() {
        for (code, expected) in [(21007, true), (21008, true), (0, false), (21006, false)] {
            let parsed = ReceiptResponse::parse(&json!({"status": code})).unwrap();
            assert_eq!(parsed.is_environment_mismatch(), expected, "code {code}");
        }
    }
}
