use std::fmt;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::Serialize;

/// JSON body posted to the verifyReceipt endpoint.
///
/// https://developer.apple.com/documentation/appstorereceipts/requestbody
#[derive(Clone, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct VerifyReceiptRequestModel {
    /// The base64-encoded receipt data.
    pub receipt_data: String,
    /// The app's shared secret.
    pub password: String,
    /// If true, the response includes only the latest renewal transaction for
    /// each subscription.
    pub exclude_old_transactions: bool,
}

impl VerifyReceiptRequestModel {
    pub(crate) fn new(receipt: &[u8], password: &str, exclude_old_transactions: bool) -> Self {
        Self {
            receipt_data: STANDARD.encode(receipt),
            password: password.to_owned(),
            exclude_old_transactions,
        }
    }
}

impl fmt::Debug for VerifyReceiptRequestModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VerifyReceiptRequestModel")
            .field("receipt_data", &format!("<{} base64 chars>", self.receipt_data.len()))
            .field("password", &"<redacted>")
            .field("exclude_old_transactions", &self.exclude_old_transactions)
            .finish()
    }
}
