use crate::{
    data::{
        datasources::verify_receipt_datasource::VerifyReceiptDatasourceImpl,
        repositories::receipt_validator_impl::ReceiptValidatorImpl,
    },
    domain::{
        entities::{endpoint::Endpoint, receipt_response::ReceiptResponse},
        repositories::receipt_validator::ReceiptValidator,
    },
    errors::IapValidatorError,
    secrets::{SecretsSource, ITUNES_SHARED_SECRET_KEY},
};

#[derive(Debug)]
pub struct IapValidatorUtil<R: ReceiptValidator> {
    receipt_validator: R,
}

impl<R: ReceiptValidator> IapValidatorUtil<R> {
    pub async fn validate(
        &mut self,
        receipt_data: &str,
        endpoint: Option<Endpoint>,
    ) -> Result<ReceiptResponse, IapValidatorError> {
        self.receipt_validator.validate(receipt_data, endpoint).await
    }

    pub fn shared_secret(&self) -> Option<&str> {
        self.receipt_validator.shared_secret()
    }

    pub fn receipt_data(&self) -> &str {
        self.receipt_validator.receipt_data()
    }

    pub fn endpoint(&self) -> Option<Endpoint> {
        self.receipt_validator.endpoint()
    }
}

impl IapValidatorUtil<ReceiptValidatorImpl<VerifyReceiptDatasourceImpl>> {
    /// Builds a validator backed by the default reqwest transport. The
    /// shared secret must be resolvable from the given source; a missing
    /// or empty secret is a deployment misconfiguration.
    pub fn new(secrets: &dyn SecretsSource) -> Result<Self, IapValidatorError> {
        let shared_secret = match secrets.resolve(ITUNES_SHARED_SECRET_KEY) {
            Some(secret) if !secret.is_empty() => secret,
            Some(_) => {
                return Err(IapValidatorError::Configuration(format!(
                    "iTunes shared secret ({ITUNES_SHARED_SECRET_KEY}) is empty"
                )))
            }
            None => {
                return Err(IapValidatorError::Configuration(format!(
                    "unable to locate iTunes shared secret ({ITUNES_SHARED_SECRET_KEY})"
                )))
            }
        };
        Ok(Self {
            receipt_validator: ReceiptValidatorImpl::new(
                VerifyReceiptDatasourceImpl::new(),
                Some(shared_secret),
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    struct MapSecretsSource(HashMap<&'static str, &'static str>);

    impl SecretsSource for MapSecretsSource {
        fn resolve(&self, key: &str) -> Option<String> {
            self.0.get(key).map(|v| v.to_string())
        }
    }

    #[test]
    fn construction_fails_when_secret_is_absent() {
        let err = IapValidatorUtil::new(&MapSecretsSource(HashMap::new())).unwrap_err();
        assert!(matches!(err, IapValidatorError::Configuration(_)));
        assert!(err.to_string().contains("unable to locate"));
    }

    #[test]
    fn construction_fails_when_secret_is_empty() {
        let source = MapSecretsSource(HashMap::from([(ITUNES_SHARED_SECRET_KEY, "")]));
        let err = IapValidatorUtil::new(&source).unwrap_err();
        assert!(matches!(err, IapValidatorError::Configuration(_)));
        assert!(err.to_string().contains("is empty"));
    }

    #[test]
    fn construction_resolves_secret_from_source() {
        let source = MapSecretsSource(HashMap::from([(ITUNES_SHARED_SECRET_KEY, "shh")]));
        let util = IapValidatorUtil::new(&source).unwrap();
        assert_eq!(util.shared_secret(), Some("shh"));
        assert_eq!(util.endpoint(), None);
        assert_eq!(util.receipt_data(), "");
    }
}
