/// verifyReceipt endpoint for receipts issued by the production App Store.
pub const PRODUCTION_VERIFY_RECEIPT_URL: &str = "https://buy.itunes.apple.com/verifyReceipt";

/// verifyReceipt endpoint for receipts issued in the sandbox environment.
pub const SANDBOX_VERIFY_RECEIPT_URL: &str = "https://sandbox.itunes.apple.com/verifyReceipt";

/// chrono format of the date portion of a receipt date, which is followed by
/// a single space and an IANA time zone identifier.
pub(crate) const RECEIPT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Zone identifier written when encoding dates.
pub(crate) const RECEIPT_DATE_ENCODE_ZONE: &str = "Etc/GMT";

/// Prefix for environment variables read by `ReceiptValidatorConfig::load`.
pub(crate) const CONFIG_ENV_PREFIX: &str = "RECEIPT_VERIFY";
