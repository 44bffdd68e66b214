use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::{
    constants::{CONFIG_ENV_PREFIX, PRODUCTION_VERIFY_RECEIPT_URL, SANDBOX_VERIFY_RECEIPT_URL},
    domain::entities::environment::Endpoint,
};

/// Immutable settings for one validator. Several validators with different
/// secrets or endpoints can coexist in one process.
#[derive(Debug)]
pub struct ReceiptValidatorConfig {
    shared_secret: SecretString,
    /// Endpoint used when the caller does not name one.
    pub endpoint: Endpoint,
    /// Ask the server for only the latest renewal of each subscription
    /// instead of the full renewal history.
    pub exclude_old_transactions: bool,
    /// Log every response body at debug level. Has no effect on results.
    pub log_response: bool,
    pub production_url: String,
    pub sandbox_url: String,
}

impl ReceiptValidatorConfig {
    pub fn new(shared_secret: impl Into<String>) -> Self {
        let shared_secret: String = shared_secret.into();
        Self {
            shared_secret: SecretString::new(shared_secret.into_boxed_str()),
            endpoint: Endpoint::default(),
            exclude_old_transactions: true,
            log_response: false,
            production_url: PRODUCTION_VERIFY_RECEIPT_URL.to_owned(),
            sandbox_url: SANDBOX_VERIFY_RECEIPT_URL.to_owned(),
        }
    }

    /// Loads settings from `RECEIPT_VERIFY_*` environment variables, reading a
    /// `.env` file first if there is one.
    ///
    /// `RECEIPT_VERIFY_SHARED_SECRET` is required. Optional:
    /// `RECEIPT_VERIFY_ENDPOINT` (production|sandbox),
    /// `RECEIPT_VERIFY_EXCLUDE_OLD_TRANSACTIONS`, `RECEIPT_VERIFY_LOG_RESPONSE`,
    /// `RECEIPT_VERIFY_PRODUCTION_URL`, `RECEIPT_VERIFY_SANDBOX_URL`.
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_environment(config::Environment::with_prefix(CONFIG_ENV_PREFIX))
    }

    // Values stay strings so that numeric-looking secrets are not rewritten;
    // booleans deserialize from "true"/"false" as they are.
    fn from_environment(environment: config::Environment) -> Result<Self, config::ConfigError> {
        let settings: ReceiptValidatorSettings = config::Config::builder()
            .add_source(environment)
            .build()?
            .try_deserialize()?;
        Ok(settings.into())
    }

    pub fn with_endpoint(mut self, endpoint: Endpoint) -> Self {
        self.endpoint = endpoint;
        self
    }

    pub fn with_exclude_old_transactions(mut self, exclude: bool) -> Self {
        self.exclude_old_transactions = exclude;
        self
    }

    pub fn with_log_response(mut self, log_response: bool) -> Self {
        self.log_response = log_response;
        self
    }

    /// Points both endpoints somewhere else, for example a proxy.
    pub fn with_urls(mut self, production_url: impl Into<String>, sandbox_url: impl Into<String>) -> Self {
        self.production_url = production_url.into();
        self.sandbox_url = sandbox_url.into();
        self
    }

    pub fn url_for(&self, endpoint: Endpoint) -> &str {
        match endpoint {
            Endpoint::Production => &self.production_url,
            Endpoint::Sandbox => &self.sandbox_url,
        }
    }

    pub(crate) fn shared_secret(&self) -> &str {
        self.shared_secret.expose_secret()
    }
}

#[derive(Deserialize)]
struct ReceiptValidatorSettings {
    shared_secret: String,
    #[serde(default)]
    endpoint: Endpoint,
    #[serde(default = "default_exclude_old_transactions")]
    exclude_old_transactions: bool,
    #[serde(default)]
    log_response: bool,
    production_url: Option<String>,
    sandbox_url: Option<String>,
}

fn default_exclude_old_transactions() -> bool {
    true
}

impl From<ReceiptValidatorSettings> for ReceiptValidatorConfig {
    fn from(settings: ReceiptValidatorSettings) -> Self {
        let mut config = ReceiptValidatorConfig::new(settings.shared_secret)
            .with_endpoint(settings.endpoint)
            .with_exclude_old_transactions(settings.exclude_old_transactions)
            .with_log_response(settings.log_response);
        if let Some(url) = settings.production_url {
            config.production_url = url;
        }
        if let Some(url) = settings.sandbox_url {
            config.sandbox_url = url;
        }
        config
    }
}
