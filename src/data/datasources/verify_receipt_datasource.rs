use async_trait::async_trait;
use reqwest::header::ACCEPT;

use crate::{
    data::models::verify_receipt::verify_receipt_request_model::VerifyReceiptRequestModel,
    errors::ValidationError,
};

/// Transport for the verifyReceipt endpoint:
/// https://developer.apple.com/documentation/appstorereceipts/verifyreceipt
#[async_trait]
pub trait VerifyReceiptDatasource: Send + Sync {
    /// Posts `request` to `url` and returns the raw response body.
    ///
    /// url:
    ///   Production or sandbox verifyReceipt URL.
    async fn post_verify_receipt(
        &self,
        url: &str,
        request: &VerifyReceiptRequestModel,
    ) -> Result<String, ValidationError>;
}

pub struct VerifyReceiptDatasourceImpl {
    client: reqwest::Client,
}

#[async_trait]
impl VerifyReceiptDatasource for VerifyReceiptDatasourceImpl {
    async fn post_verify_receipt(
        &self,
        url: &str,
        request: &VerifyReceiptRequestModel,
    ) -> Result<String, ValidationError> {
        let response = self
            .client
            .post(url)
            .header(ACCEPT, "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| {
                ValidationError::RequestError(format!("Callout failed to send; {url}; {e:?}"))
            })?;

        if !response.status().is_success() {
            return Err(ValidationError::RequestError(format!(
                "Callout returned with non-200 status code; {}; {}; {}",
                url,
                response.status(),
                response.text().await.unwrap_or_default()
            )));
        }

        response.text().await.map_err(|e| {
            ValidationError::RequestError(format!("Failed to read callout response; {url}; {e:?}"))
        })
    }
}

impl VerifyReceiptDatasourceImpl {
    pub(crate) fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}
