use async_trait::async_trait;

use crate::{
    domain::entities::{
        environment::Endpoint, receipt_validation_response::ReceiptValidationResponse,
    },
    errors::ValidationError,
};

#[async_trait]
pub trait ReceiptRepository: Send + Sync {
    /// Performs one verification round-trip for `receipt` against
    /// `endpoint`.
    ///
    /// Fails with [`ValidationError::ReceiptLoadError`] without touching the
    /// network if `receipt` is missing or empty. Environment mismatches are
    /// returned as errors; this never resubmits on its own.
    async fn validate_receipt(
        &self,
        receipt: Option<&[u8]>,
        endpoint: Endpoint,
    ) -> Result<ReceiptValidationResponse, ValidationError>;
}
