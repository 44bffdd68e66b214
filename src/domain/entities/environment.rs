use serde::{Deserialize, Serialize};

use crate::constants::{PRODUCTION_VERIFY_RECEIPT_URL, SANDBOX_VERIFY_RECEIPT_URL};

/// Environment echoed back by the verification server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    /// The receipt was issued in the sandbox environment.
    Sandbox,
    /// The receipt was issued by the production App Store.
    Production,

    #[serde(untagged)]
    Unknown(String),
}

/// The verifyReceipt endpoint a request is sent to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Endpoint {
    #[default]
    Production,
    Sandbox,
}

impl Endpoint {
    /// The other endpoint, used when the server reports an environment
    /// mismatch.
    pub fn alternate(self) -> Self {
        match self {
            Endpoint::Production => Endpoint::Sandbox,
            Endpoint::Sandbox => Endpoint::Production,
        }
    }

    pub fn default_url(self) -> &'static str {
        match self {
            Endpoint::Production => PRODUCTION_VERIFY_RECEIPT_URL,
            Endpoint::Sandbox => SANDBOX_VERIFY_RECEIPT_URL,
        }
    }
}
