use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr};

use crate::date_format;

/// One purchase or renewal transaction, as found in `latest_receipt_info` or
/// in the receipt's `in_app` list.
///
/// Every field is optional on the wire. Dates use the fixed receipt date
/// format (see [`crate::date_format`]); the `_ms` fields carry the same
/// instants as millisecond epoch strings.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Subscription {
    /// The number of items purchased.
    pub quantity: Option<String>,
    /// The product identifier of the item that was purchased.
    pub product_id: Option<String>,
    /// The identifier of this transaction.
    pub transaction_id: Option<String>,
    /// The transaction identifier of the original purchase. Constant across
    /// all renewals of the same subscription.
    pub original_transaction_id: Option<String>,
    /// When the App Store charged the customer for this purchase or renewal.
    #[serde(default, with = "date_format::option")]
    pub purchase_date: Option<DateTime<Utc>>,
    pub purchase_date_ms: Option<String>,
    #[serde(default, with = "date_format::option")]
    pub purchase_date_pst: Option<DateTime<Utc>>,
    /// Purchase date of the original transaction.
    #[serde(default, with = "date_format::option")]
    pub original_purchase_date: Option<DateTime<Utc>>,
    pub original_purchase_date_ms: Option<String>,
    #[serde(default, with = "date_format::option")]
    pub original_purchase_date_pst: Option<DateTime<Utc>>,
    /// When the subscription expires or renews.
    #[serde(default, with = "date_format::option")]
    pub expires_date: Option<DateTime<Utc>>,
    pub expires_date_ms: Option<String>,
    #[serde(default, with = "date_format::option")]
    pub expires_date_pst: Option<DateTime<Utc>>,
    /// Set only when Apple customer support refunded the transaction.
    #[serde(default, with = "date_format::option")]
    pub cancellation_date: Option<DateTime<Utc>>,
    pub cancellation_date_ms: Option<String>,
    /// Why the transaction was refunded. Present together with
    /// `cancellation_date`.
    #[serde_as(as = "Option<DisplayFromStr>")]
    pub cancellation_reason: Option<CancellationReason>,
    /// Identifies subscription purchase events across devices, including
    /// renewals.
    pub web_order_line_item_id: Option<String>,
    /// "true" while the subscription is in its free trial period.
    pub is_trial_period: Option<String>,
    /// "true" while the subscription is in an introductory price period.
    pub is_in_intro_offer_period: Option<String>,
}

impl Subscription {
    /// Whether `now` falls within `[purchase_date, expires_date]`. A
    /// transaction missing either date is never active.
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        match (self.purchase_date, self.expires_date) {
            (Some(purchased), Some(expires)) => purchased <= now && now <= expires,
            _ => false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.is_active_at(Utc::now())
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancellation_date.is_some()
    }

    pub fn is_trial(&self) -> bool {
        is_true(self.is_trial_period.as_deref())
    }

    pub fn is_intro_offer(&self) -> bool {
        is_true(self.is_in_intro_offer_period.as_deref())
    }
}

pub(crate) fn is_true(flag: Option<&str>) -> bool {
    matches!(flag, Some("true") | Some("1"))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancellationReason {
    /// The customer canceled for another reason, for example an accidental
    /// purchase.
    Other,
    /// The customer canceled due to an actual or perceived issue within the
    /// app.
    AppIssue,
}

impl FromStr for CancellationReason {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "0" => Ok(Self::Other),
            "1" => Ok(Self::AppIssue),
            other => Err(format!("unknown cancellation_reason '{other}'")),
        }
    }
}

impl fmt::Display for CancellationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Other => "0",
            Self::AppIssue => "1",
        })
    }
}
