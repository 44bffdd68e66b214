//! Serde helpers for the date strings used throughout verifyReceipt
//! payloads.
//!
//! Dates look like `2019-01-01 00:00:00 Etc/GMT`: a local date and time
//! followed by an IANA zone identifier. Anything else is rejected, which
//! makes the enclosing decode fail.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Deserializer, Serializer};

use crate::constants::{RECEIPT_DATE_ENCODE_ZONE, RECEIPT_DATE_FORMAT};

/// Parses a receipt date string into UTC.
pub fn parse_receipt_date(value: &str) -> Result<DateTime<Utc>, String> {
    let (local, zone) = value
        .rsplit_once(' ')
        .ok_or_else(|| format!("receipt date '{value}' has no time zone"))?;
    let zone: Tz = zone
        .parse()
        .map_err(|_| format!("receipt date '{value}' has unknown time zone '{zone}'"))?;
    let naive = NaiveDateTime::parse_from_str(local, RECEIPT_DATE_FORMAT)
        .map_err(|e| format!("receipt date '{value}' is malformed: {e}"))?;
    // chrono accepts unpadded fields, extra whitespace and signed years.
    if local.len() != 19 || naive.format(RECEIPT_DATE_FORMAT).to_string() != local {
        return Err(format!("receipt date '{value}' is not zero-padded yyyy-MM-dd HH:mm:ss"));
    }
    zone.from_local_datetime(&naive)
        .earliest()
        .map(|d| d.with_timezone(&Utc))
        .ok_or_else(|| format!("receipt date '{value}' does not exist in '{zone}'"))
}

/// Formats a timestamp the way the verification server does, in `Etc/GMT`.
pub fn format_receipt_date(value: &DateTime<Utc>) -> String {
    format!(
        "{} {}",
        value.format(RECEIPT_DATE_FORMAT),
        RECEIPT_DATE_ENCODE_ZONE
    )
}

pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_receipt_date(value))
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
    let raw = String::deserialize(deserializer)?;
    parse_receipt_date(&raw).map_err(serde::de::Error::custom)
}

/// Same as the parent module, for optional fields. Use together with
/// `#[serde(default)]` so that absent keys decode to `None`.
pub mod option {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &Option<DateTime<Utc>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(v) => super::serialize(v, serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        Option::<String>::deserialize(deserializer)?
            .map(|raw| super::parse_receipt_date(&raw).map_err(serde::de::Error::custom))
            .transpose()
    }
}
