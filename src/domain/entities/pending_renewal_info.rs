use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr};

use super::subscription::is_true;

/// Renewal intent for one auto-renewable subscription product family.
///
/// Present only for auto-renewable subscription receipts.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PendingRenewalInfo {
    /// The product the customer is currently subscribed to.
    pub product_id: Option<String>,
    /// The transaction identifier of the original purchase.
    pub original_transaction_id: Option<String>,
    /// The product that the subscription renews into. Differs from
    /// `product_id` when the customer scheduled a downgrade or crossgrade.
    pub auto_renew_product_id: Option<String>,
    /// Whether the subscription renews at the end of the current period.
    /// This is not the subscription status.
    #[serde_as(as = "Option<DisplayFromStr>")]
    pub auto_renew_status: Option<AutoRenewStatus>,
    /// Why an expired subscription was not renewed. Only present for expired
    /// subscriptions.
    #[serde_as(as = "Option<DisplayFromStr>")]
    pub expiration_intent: Option<ExpirationIntent>,
    /// "1" while the App Store is still trying to renew an expired
    /// subscription.
    pub is_in_billing_retry_period: Option<String>,
    /// Only present if the subscription price was raised in a way that
    /// requires customer consent.
    #[serde_as(as = "Option<DisplayFromStr>")]
    pub price_consent_status: Option<PriceConsentStatus>,
}

impl PendingRenewalInfo {
    pub fn will_auto_renew(&self) -> bool {
        self.auto_renew_status == Some(AutoRenewStatus::On)
    }

    pub fn is_in_billing_retry(&self) -> bool {
        is_true(self.is_in_billing_retry_period.as_deref())
    }

    /// The customer has a downgrade or crossgrade scheduled for the next
    /// renewal.
    pub fn has_pending_product_change(&self) -> bool {
        match (&self.product_id, &self.auto_renew_product_id) {
            (Some(current), Some(next)) => current != next,
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoRenewStatus {
    /// The customer turned off automatic renewal.
    Off,
    /// The subscription renews at the end of the current period.
    On,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpirationIntent {
    /// The customer canceled their subscription.
    VoluntaryCancellation,
    /// Billing error; for example, the customer's payment information is no
    /// longer valid.
    BillingError,
    /// The customer didn't agree to a recent price increase.
    PriceIncreaseDecline,
    /// The product wasn't available for purchase at the time of renewal.
    ProductUnavailable,
    /// Unknown error.
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceConsentStatus {
    /// The customer hasn't responded yet. The subscription expires if they
    /// take no action before the renewal date.
    NoActionTaken,
    /// The customer agreed to the price increase.
    Consented,
}

/// Implements `FromStr`/`Display` over the numeric strings used on the wire.
macro_rules! wire_code_enum {
    ($name:ident, $field:literal, { $($code:literal => $variant:ident),+ $(,)? }) => {
        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($code => Ok(Self::$variant),)+
                    other => Err(format!(concat!("unknown ", $field, " '{}'"), other)),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(match self {
                    $(Self::$variant => $code,)+
                })
            }
        }
    };
}

wire_code_enum!(AutoRenewStatus, "auto_renew_status", {
    "0" => Off,
    "1" => On,
});

wire_code_enum!(ExpirationIntent, "expiration_intent", {
    "1" => VoluntaryCancellation,
    "2" => BillingError,
    "3" => PriceIncreaseDecline,
    "4" => ProductUnavailable,
    "5" => Other,
});

wire_code_enum!(PriceConsentStatus, "price_consent_status", {
    "0" => NoActionTaken,
    "1" => Consented,
});
