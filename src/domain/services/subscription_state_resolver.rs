use std::cmp::Ordering;

use chrono::{DateTime, Utc};

use crate::domain::entities::subscription::Subscription;

/// Picks the transaction that determines the customer's current
/// entitlement.
///
/// Only transactions active at `now` are considered. The most recently
/// purchased one wins. On equal purchase dates the transaction id decides:
/// numeric ids rank above non-numeric ones, numeric ids compare by value,
/// remaining ties compare lexically, and a missing id always loses. This is a
/// total order, so the result does not depend on input order. Recompute
/// whenever the transaction list changes.
pub fn current_subscription(
    transactions: &[Subscription],
    now: DateTime<Utc>,
) -> Option<&Subscription> {
    transactions
        .iter()
        .filter(|t| t.is_active_at(now))
        .max_by(|a, b| compare_recency(a, b))
}

fn compare_recency(a: &Subscription, b: &Subscription) -> Ordering {
    a.purchase_date.cmp(&b.purchase_date).then_with(|| {
        compare_transaction_ids(a.transaction_id.as_deref(), b.transaction_id.as_deref())
    })
}

fn compare_transaction_ids(a: Option<&str>, b: Option<&str>) -> Ordering {
    transaction_id_rank(a).cmp(&transaction_id_rank(b))
}

fn transaction_id_rank(id: Option<&str>) -> Option<(Option<u64>, &str)> {
    id.map(|id| (id.parse::<u64>().ok(), id))
}
