use tracing::instrument;

use crate::{
    config::ReceiptValidatorConfig,
    data::{
        datasources::verify_receipt_datasource::{
            VerifyReceiptDatasource, VerifyReceiptDatasourceImpl,
        },
        repositories::receipt_repository_impl::ReceiptRepositoryImpl,
    },
    domain::{
        entities::{
            environment::Endpoint, receipt_validation_response::ReceiptValidationResponse,
        },
        repositories::{receipt_repository::ReceiptRepository, receipt_source::ReceiptSource},
    },
    errors::ValidationError,
};

/// Validates the receipt provided by a [`ReceiptSource`] against the
/// verifyReceipt service.
pub struct ReceiptValidator<R: ReceiptRepository, S: ReceiptSource> {
    receipt_repository: R,
    receipt_source: S,
    default_endpoint: Endpoint,
}

impl<R: ReceiptRepository, S: ReceiptSource> ReceiptValidator<R, S> {
    pub fn from_parts(receipt_repository: R, receipt_source: S, default_endpoint: Endpoint) -> Self {
        Self {
            receipt_repository,
            receipt_source,
            default_endpoint,
        }
    }

    /// Validates against the configured default endpoint.
    pub async fn validate_receipt(&self) -> Result<ReceiptValidationResponse, ValidationError> {
        self.validate_receipt_at(self.default_endpoint).await
    }

    /// One round-trip against `endpoint`. An environment mismatch is returned
    /// as-is; see [`ValidationError::redirect_endpoint`].
    pub async fn validate_receipt_at(
        &self,
        endpoint: Endpoint,
    ) -> Result<ReceiptValidationResponse, ValidationError> {
        let receipt = self.receipt_source.load_receipt().await;
        self.receipt_repository
            .validate_receipt(receipt.as_deref(), endpoint)
            .await
    }

    /// Validates against `endpoint` and, if the server reports the receipt
    /// belongs to the other environment, resubmits to `endpoint.alternate()`
    /// exactly once. The receipt is loaded only once.
    #[instrument(skip(self))]
    pub async fn validate_receipt_following_redirect(
        &self,
        endpoint: Endpoint,
    ) -> Result<ReceiptValidationResponse, ValidationError> {
        let receipt = self.receipt_source.load_receipt().await;
        let first = self
            .receipt_repository
            .validate_receipt(receipt.as_deref(), endpoint)
            .await;
        match first {
            Err(e) => match e.redirect_endpoint() {
                Some(redirect) if redirect == endpoint.alternate() => {
                    tracing::info!(?redirect, "Resubmitting receipt to the other environment.");
                    self.receipt_repository
                        .validate_receipt(receipt.as_deref(), redirect)
                        .await
                }
                _ => Err(e),
            },
            ok => ok,
        }
    }

    pub fn default_endpoint(&self) -> Endpoint {
        self.default_endpoint
    }
}

impl<S: ReceiptSource> ReceiptValidator<ReceiptRepositoryImpl<VerifyReceiptDatasourceImpl>, S> {
    pub fn new(config: ReceiptValidatorConfig, receipt_source: S) -> Self {
        Self::with_client(config, receipt_source, reqwest::Client::new())
    }

    /// Uses `client` for all callouts. Configure timeouts on it; the
    /// validator does not impose any.
    pub fn with_client(
        config: ReceiptValidatorConfig,
        receipt_source: S,
        client: reqwest::Client,
    ) -> Self {
        let default_endpoint = config.endpoint;
        Self::from_parts(
            ReceiptRepositoryImpl::new(config, client),
            receipt_source,
            default_endpoint,
        )
    }
}

impl<D: VerifyReceiptDatasource, S: ReceiptSource> ReceiptValidator<ReceiptRepositoryImpl<D>, S> {
    /// Uses a custom transport instead of reqwest.
    pub fn with_datasource(config: ReceiptValidatorConfig, receipt_source: S, datasource: D) -> Self {
        let default_endpoint = config.endpoint;
        Self::from_parts(
            ReceiptRepositoryImpl::with_datasource(datasource, config),
            receipt_source,
            default_endpoint,
        )
    }

    pub fn config(&self) -> &ReceiptValidatorConfig {
        self.receipt_repository.config()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex,
    };

    use async_trait::async_trait;

    use super::*;
    use crate::data::datasources::receipt_source_impls::InMemoryReceiptSource;

    /// Returns canned results in order and counts how often each endpoint was
    /// used.
    struct ScriptedRepository {
        results: Mutex<Vec<Result<ReceiptValidationResponse, ValidationError>>>,
        endpoints: Mutex<Vec<Endpoint>>,
    }

    impl ScriptedRepository {
        fn new(results: Vec<Result<ReceiptValidationResponse, ValidationError>>) -> Self {
            Self {
                results: Mutex::new(results),
                endpoints: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ReceiptRepository for ScriptedRepository {
        async fn validate_receipt(
            &self,
            receipt: Option<&[u8]>,
            endpoint: Endpoint,
        ) -> Result<ReceiptValidationResponse, ValidationError> {
            assert_eq!(receipt, Some(&b"receipt"[..]));
            self.endpoints.lock().unwrap().push(endpoint);
            self.results.lock().unwrap().remove(0)
        }
    }

    struct CountingSource(AtomicUsize);

    #[async_trait]
    impl ReceiptSource for CountingSource {
        async fn load_receipt(&self) -> Option<Vec<u8>> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Some(b"receipt".to_vec())
        }
    }

    fn ok_response() -> ReceiptValidationResponse {
        serde_json::from_str(r#"{"status": 0, "environment": "Sandbox"}"#).unwrap()
    }

    #[tokio::test]
    async fn follows_sandbox_redirect_once() {
        let validator = ReceiptValidator::from_parts(
            ScriptedRepository::new(vec![
                Err(ValidationError::EnvironmentMismatchSandbox),
                Ok(ok_response()),
            ]),
            CountingSource(AtomicUsize::new(0)),
            Endpoint::Production,
        );
        let response = validator
            .validate_receipt_following_redirect(Endpoint::Production)
            .await
            .unwrap();
        assert_eq!(response, ok_response());
        assert_eq!(
            *validator.receipt_repository.endpoints.lock().unwrap(),
            vec![Endpoint::Production, Endpoint::Sandbox]
        );
        assert_eq!(validator.receipt_source.0.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn does_not_loop_on_repeated_mismatch() {
        let validator = ReceiptValidator::from_parts(
            ScriptedRepository::new(vec![
                Err(ValidationError::EnvironmentMismatchProduction),
                Err(ValidationError::EnvironmentMismatchSandbox),
            ]),
            CountingSource(AtomicUsize::new(0)),
            Endpoint::Production,
        );
        assert_eq!(
            validator
                .validate_receipt_following_redirect(Endpoint::Sandbox)
                .await,
            Err(ValidationError::EnvironmentMismatchSandbox)
        );
        assert_eq!(
            *validator.receipt_repository.endpoints.lock().unwrap(),
            vec![Endpoint::Sandbox, Endpoint::Production]
        );
    }

    #[tokio::test]
    async fn mismatch_pointing_back_at_same_endpoint_is_returned() {
        let validator = ReceiptValidator::from_parts(
            ScriptedRepository::new(vec![Err(ValidationError::EnvironmentMismatchSandbox)]),
            CountingSource(AtomicUsize::new(0)),
            Endpoint::Production,
        );
        assert_eq!(
            validator
                .validate_receipt_following_redirect(Endpoint::Sandbox)
                .await,
            Err(ValidationError::EnvironmentMismatchSandbox)
        );
        assert_eq!(
            *validator.receipt_repository.endpoints.lock().unwrap(),
            vec![Endpoint::Sandbox]
        );
    }

    #[tokio::test]
    async fn terminal_errors_are_not_retried() {
        let validator = ReceiptValidator::from_parts(
            ScriptedRepository::new(vec![Err(ValidationError::AuthenticationError)]),
            CountingSource(AtomicUsize::new(0)),
            Endpoint::Production,
        );
        assert_eq!(
            validator
                .validate_receipt_following_redirect(Endpoint::Production)
                .await,
            Err(ValidationError::AuthenticationError)
        );
        assert_eq!(validator.receipt_repository.endpoints.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn plain_validation_surfaces_redirect_signal() {
        let validator = ReceiptValidator::from_parts(
            ScriptedRepository::new(vec![Err(ValidationError::EnvironmentMismatchSandbox)]),
            CountingSource(AtomicUsize::new(0)),
            Endpoint::Production,
        );
        let error = validator.validate_receipt().await.unwrap_err();
        assert_eq!(error.redirect_endpoint(), Some(Endpoint::Sandbox));
        assert_eq!(validator.receipt_repository.endpoints.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn default_stack_reports_missing_receipt_without_network() {
        let validator = ReceiptValidator::with_client(
            ReceiptValidatorConfig::new("secret").with_urls("http://127.0.0.1:9/a", "http://127.0.0.1:9/b"),
            InMemoryReceiptSource::empty(),
            reqwest::Client::new(),
        );
        assert_eq!(
            validator.validate_receipt().await,
            Err(ValidationError::ReceiptLoadError)
        );
    }
}
