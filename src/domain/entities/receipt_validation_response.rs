use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{
    entities::{
        environment::Environment, pending_renewal_info::PendingRenewalInfo,
        subscription::Subscription, subscription_receipt::SubscriptionReceipt,
    },
    services::subscription_state_resolver::current_subscription,
};

/// Body returned by the verifyReceipt endpoint.
///
/// https://developer.apple.com/documentation/appstorereceipts/responsebody
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiptValidationResponse {
    /// `0` if the receipt is valid, otherwise the error status code.
    pub status: i32,
    /// The environment the receipt was generated in.
    pub environment: Option<Environment>,
    /// The decoded receipt that was sent for verification.
    pub receipt: Option<SubscriptionReceipt>,
    /// The latest base64-encoded app receipt. Only returned for receipts that
    /// contain auto-renewable subscriptions; can be stored and re-validated
    /// later without asking the device for a fresh receipt.
    #[serde(rename = "latest_receipt")]
    pub latest_receipt_base64: Option<String>,
    /// All in-app purchase transactions, including every renewal unless old
    /// transactions were excluded in the request.
    #[serde(default)]
    pub latest_receipt_info: Vec<Subscription>,
    /// One entry per auto-renewable product family.
    #[serde(default)]
    pub pending_renewal_info: Vec<PendingRenewalInfo>,
}

impl ReceiptValidationResponse {
    /// The authoritative active subscription in `latest_receipt_info` at
    /// `now`.
    pub fn current_subscription_at(&self, now: DateTime<Utc>) -> Option<&Subscription> {
        current_subscription(&self.latest_receipt_info, now)
    }

    pub fn current_subscription(&self) -> Option<&Subscription> {
        self.current_subscription_at(Utc::now())
    }

    pub fn pending_renewal_info_for(
        &self,
        original_transaction_id: &str,
    ) -> Option<&PendingRenewalInfo> {
        self.pending_renewal_info
            .iter()
            .find(|info| info.original_transaction_id.as_deref() == Some(original_transaction_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::pending_renewal_info::{AutoRenewStatus, ExpirationIntent};
    use chrono::TimeZone;

    fn synthetic() -> ReceiptValidationResponse {
        let purchased = Utc.with_ymd_and_hms(2019, 1, 1, 0, 0, 0).unwrap();
        let expires = Utc.with_ymd_and_hms(2019, 2, 1, 0, 0, 0).unwrap();
        let subscription = Subscription {
            quantity: Some("1".to_owned()),
            product_id: Some("com.example.monthly".to_owned()),
            transaction_id: Some("1000000500000001".to_owned()),
            original_transaction_id: Some("1000000500000000".to_owned()),
            purchase_date: Some(purchased),
            purchase_date_ms: Some("1546300800000".to_owned()),
            purchase_date_pst: Some(purchased),
            expires_date: Some(expires),
            expires_date_ms: Some("1548979200000".to_owned()),
            is_trial_period: Some("false".to_owned()),
            ..Default::default()
        };
        ReceiptValidationResponse {
            status: 0,
            environment: Some(Environment::Sandbox),
            receipt: Some(SubscriptionReceipt {
                bundle_id: Some("com.example.app".to_owned()),
                application_version: Some("42".to_owned()),
                in_app: vec![subscription.clone()],
                original_purchase_date: Some(purchased),
                download_id: Some(0),
                ..Default::default()
            }),
            latest_receipt_base64: Some("TUlJVA==".to_owned()),
            latest_receipt_info: vec![subscription],
            pending_renewal_info: vec![PendingRenewalInfo {
                product_id: Some("com.example.monthly".to_owned()),
                original_transaction_id: Some("1000000500000000".to_owned()),
                auto_renew_product_id: Some("com.example.monthly".to_owned()),
                auto_renew_status: Some(AutoRenewStatus::Off),
                expiration_intent: Some(ExpirationIntent::VoluntaryCancellation),
                ..Default::default()
            }],
        }
    }

    #[test]
    fn encode_then_decode_reproduces_fields() {
        let original = synthetic();
        let json = serde_json::to_string(&original).unwrap();
        assert!(json.contains("\"2019-01-01 00:00:00 Etc/GMT\""));
        assert!(json.contains("\"latest_receipt\":\"TUlJVA==\""));
        let decoded: ReceiptValidationResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn absent_lists_decode_empty() {
        let decoded: ReceiptValidationResponse =
            serde_json::from_str(r#"{"status": 21007}"#).unwrap();
        assert_eq!(decoded.status, 21007);
        assert!(decoded.latest_receipt_info.is_empty());
        assert!(decoded.pending_renewal_info.is_empty());
        assert_eq!(decoded.receipt, None);
    }

    #[test]
    fn missing_status_fails_decode() {
        let result: Result<ReceiptValidationResponse, _> =
            serde_json::from_str(r#"{"environment": "Production"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn finds_renewal_info_and_current_subscription() {
        let response = synthetic();
        let mid_period = Utc.with_ymd_and_hms(2019, 1, 15, 0, 0, 0).unwrap();
        assert_eq!(
            response
                .current_subscription_at(mid_period)
                .and_then(|s| s.transaction_id.as_deref()),
            Some("1000000500000001")
        );
        assert_eq!(
            response
                .receipt
                .as_ref()
                .and_then(|r| r.current_subscription_at(mid_period))
                .and_then(|s| s.product_id.as_deref()),
            Some("com.example.monthly")
        );
        assert!(response.pending_renewal_info_for("1000000500000000").is_some());
        assert!(response.pending_renewal_info_for("nope").is_none());
    }
}
