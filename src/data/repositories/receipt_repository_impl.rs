use async_trait::async_trait;
use tracing::instrument;

use crate::{
    config::ReceiptValidatorConfig,
    data::{
        datasources::{
            utils::{decode_verify_receipt_response, log_response_body},
            verify_receipt_datasource::{VerifyReceiptDatasource, VerifyReceiptDatasourceImpl},
        },
        models::verify_receipt::verify_receipt_request_model::VerifyReceiptRequestModel,
    },
    domain::{
        entities::{
            environment::Endpoint, receipt_validation_response::ReceiptValidationResponse,
        },
        repositories::receipt_repository::ReceiptRepository,
    },
    errors::ValidationError,
};

pub struct ReceiptRepositoryImpl<D: VerifyReceiptDatasource> {
    verify_receipt_datasource: D,
    config: ReceiptValidatorConfig,
}

#[async_trait]
impl<D: VerifyReceiptDatasource> ReceiptRepository for ReceiptRepositoryImpl<D> {
    #[instrument(skip(self, receipt))]
    async fn validate_receipt(
        &self,
        receipt: Option<&[u8]>,
        endpoint: Endpoint,
    ) -> Result<ReceiptValidationResponse, ValidationError> {
        let receipt = match receipt {
            Some(bytes) if !bytes.is_empty() => bytes,
            _ => return Err(ValidationError::ReceiptLoadError),
        };
        let request = VerifyReceiptRequestModel::new(
            receipt,
            self.config.shared_secret(),
            self.config.exclude_old_transactions,
        );
        let url = self.config.url_for(endpoint);
        tracing::debug!(url, "Validating receipt.");

        let body = self
            .verify_receipt_datasource
            .post_verify_receipt(url, &request)
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "Receipt validation failed."))?;

        if self.config.log_response {
            log_response_body(&body);
        }

        decode_verify_receipt_response(&body).inspect_err(|e| match e {
            ValidationError::EnvironmentMismatchSandbox
            | ValidationError::EnvironmentMismatchProduction => {
                tracing::info!(code = e.code(), "Receipt sent to the wrong environment.")
            }
            _ => tracing::warn!(code = e.code(), error = %e, "Receipt validation failed."),
        })
    }
}

impl<D: VerifyReceiptDatasource> ReceiptRepositoryImpl<D> {
    pub(crate) fn with_datasource(verify_receipt_datasource: D, config: ReceiptValidatorConfig) -> Self {
        Self {
            verify_receipt_datasource,
            config,
        }
    }

    pub(crate) fn config(&self) -> &ReceiptValidatorConfig {
        &self.config
    }
}

impl ReceiptRepositoryImpl<VerifyReceiptDatasourceImpl> {
    pub(crate) fn new(config: ReceiptValidatorConfig, client: reqwest::Client) -> Self {
        Self::with_datasource(VerifyReceiptDatasourceImpl::new(client), config)
    }
}
