/// Configuration key holding the vendor-issued shared secret.
pub const ITUNES_SHARED_SECRET_KEY: &str = "IAP_ITUNES_SECRET";

/// Resolves named configuration keys to secret values.
///
/// `None` means the key is not set at all; a key set to an empty string
/// resolves to `Some("")`, letting callers distinguish the two.
pub trait SecretsSource: Send + Sync {
    fn resolve(&self, key: &str) -> Option<String>;
}

/// Reads secrets from the process environment.
#[derive(Debug, Default)]
pub struct EnvSecretsSource;

impl SecretsSource for EnvSecretsSource {
    fn resolve(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}
