use std::{fmt, str::FromStr};

use crate::errors::IapValidatorError;

pub const PRODUCTION_ENDPOINT: &str = "https://buy.itunes.apple.com/verifyReceipt";
pub const SANDBOX_ENDPOINT: &str = "https://sandbox.itunes.apple.com/verifyReceipt";

/// The two verifyReceipt deployments. Receipts issued in one environment
/// must be validated against the matching endpoint; no other endpoint
/// values are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Production,
    Sandbox,
}

impl Endpoint {
    pub fn url(&self) -> &'static str {
        match self {
            Endpoint::Production => PRODUCTION_ENDPOINT,
            Endpoint::Sandbox => SANDBOX_ENDPOINT,
        }
    }

    pub fn counterpart(&self) -> Endpoint {
        match self {
            Endpoint::Production => Endpoint::Sandbox,
            Endpoint::Sandbox => Endpoint::Production,
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Production => f.write_str("Production"),
            Endpoint::Sandbox => f.write_str("Sandbox"),
        }
    }
}

impl FromStr for Endpoint {
    type Err = IapValidatorError;

    /// Accepts the two known endpoint URLs, or the environment names as
    /// reported by the vendor in its responses.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            PRODUCTION_ENDPOINT | "Production" => Ok(Endpoint::Production),
            SANDBOX_ENDPOINT | "Sandbox" => Ok(Endpoint::Sandbox),
            other => Err(IapValidatorError::InvalidInput(format!(
                "invalid end-point provided: {other}"
            ))),
        }
    }
}
