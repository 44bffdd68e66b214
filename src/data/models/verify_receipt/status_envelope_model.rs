use serde::Deserialize;

/// The smallest part of a verifyReceipt response that is always present.
/// Used to recover the status code from bodies that fail the full decode.
#[derive(Debug, Deserialize)]
pub(crate) struct StatusEnvelopeModel {
    pub(crate) status: i32,
}
