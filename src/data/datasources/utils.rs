use crate::{
    data::models::verify_receipt::status_envelope_model::StatusEnvelopeModel,
    domain::entities::receipt_validation_response::ReceiptValidationResponse,
    errors::ValidationError,
};

/// Decodes a verifyReceipt body and maps a nonzero status to its error.
///
/// A body that fails the full decode is a `JsonReadFailure`, unless its
/// status alone can still be read and is nonzero, in which case the status
/// error wins so that environment mismatches are never masked.
pub(crate) fn decode_verify_receipt_response(
    body: &str,
) -> Result<ReceiptValidationResponse, ValidationError> {
    let response: ReceiptValidationResponse = match serde_json::from_str(body) {
        Ok(response) => response,
        Err(decode_error) => {
            let status_error = serde_json::from_str::<StatusEnvelopeModel>(body)
                .ok()
                .and_then(|envelope| ValidationError::from_status(envelope.status));
            return Err(status_error.unwrap_or_else(|| {
                ValidationError::JsonReadFailure(format!(
                    "failed to parse verifyReceipt response; {decode_error}"
                ))
            }));
        }
    };
    match ValidationError::from_status(response.status) {
        Some(status_error) => Err(status_error),
        None => Ok(response),
    }
}

/// Logs the pretty-printed body. Diagnostics only.
pub(crate) fn log_response_body(body: &str) {
    match serde_json::from_str::<serde_json::Value>(body)
        .and_then(|value| serde_json::to_string_pretty(&value))
    {
        Ok(pretty) => tracing::debug!("verifyReceipt response:\n{pretty}"),
        Err(e) => tracing::debug!(error = %e, "Unable to pretty-print verifyReceipt response."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_status_yields_response() {
        let response = decode_verify_receipt_response(
            r#"{"status": 0, "environment": "Production", "latest_receipt_info": []}"#,
        )
        .unwrap();
        assert_eq!(response.status, 0);
    }

    #[test]
    fn redirect_status_yields_error_only() {
        assert_eq!(
            decode_verify_receipt_response(r#"{"status": 21007}"#),
            Err(ValidationError::EnvironmentMismatchSandbox)
        );
    }

    #[test]
    fn malformed_date_with_success_status_is_read_failure() {
        let result = decode_verify_receipt_response(
            r#"{"status": 0, "latest_receipt_info": [{"purchase_date": "2019-01-01T00:00:00Z"}]}"#,
        );
        assert!(matches!(result, Err(ValidationError::JsonReadFailure(_))));
    }

    #[test]
    fn malformed_body_with_mismatch_status_keeps_redirect() {
        let result = decode_verify_receipt_response(
            r#"{"status": 21008, "receipt": {"original_purchase_date": "yesterday"}}"#,
        );
        assert_eq!(result, Err(ValidationError::EnvironmentMismatchProduction));
    }

    #[test]
    fn non_json_body_is_read_failure() {
        let result = decode_verify_receipt_response("<html>bad gateway</html>");
        assert!(matches!(result, Err(ValidationError::JsonReadFailure(_))));
    }
}
