use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    date_format,
    domain::{
        entities::subscription::Subscription,
        services::subscription_state_resolver::current_subscription,
    },
};

/// The decoded original receipt: the app it was issued for plus every
/// embedded purchase.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SubscriptionReceipt {
    /// The app's bundle identifier.
    pub bundle_id: Option<String>,
    /// The app's version number (CFBundleVersion) at the time of the request.
    pub application_version: Option<String>,
    /// Every in-app purchase recorded in the receipt.
    #[serde(default)]
    pub in_app: Vec<Subscription>,
    /// The version of the app the customer originally purchased.
    pub original_application_version: Option<String>,
    /// When the customer originally purchased the app.
    #[serde(default, with = "date_format::option")]
    pub original_purchase_date: Option<DateTime<Utc>>,
    /// When the App Store generated the receipt.
    #[serde(default, with = "date_format::option")]
    pub receipt_creation_date: Option<DateTime<Utc>>,
    /// For example "Production" or "ProductionSandbox".
    pub receipt_type: Option<String>,
    /// Raw value; the server does not guarantee a date format for this key.
    pub request_date: Option<String>,
    pub download_id: Option<i64>,
}

impl SubscriptionReceipt {
    pub fn current_subscription_at(&self, now: DateTime<Utc>) -> Option<&Subscription> {
        current_subscription(&self.in_app, now)
    }

    pub fn current_subscription(&self) -> Option<&Subscription> {
        self.current_subscription_at(Utc::now())
    }
}
