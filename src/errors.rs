use crate::domain::entities::environment::Endpoint;

/// Everything that can go wrong during a single receipt validation attempt.
///
/// Variants backed by a verifyReceipt status code report it through
/// [`ValidationError::code`]. The two environment mismatch variants are
/// recoverable by resubmitting to the other endpoint; everything else is
/// terminal for the attempt.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Unable to generate a receipt validation request: {0}")]
    RequestError(String),

    #[error("Unable to locate purchase receipt.")]
    ReceiptLoadError,

    #[error("App store could not read receipt json: {0}")]
    JsonReadFailure(String),

    #[error("Receipt data malformed or missing.")]
    DataMalformed,

    #[error("Receipt could not be authenticated.")]
    AuthenticationError,

    #[error("Shared secret error.")]
    SharedSecretError,

    #[error("Receipt server unavailable.")]
    ServerUnavailable,

    #[error("Subscription expired.")]
    SubscriptionExpired,

    #[error("Receipt is a sandbox receipt but sent to production server. Resubmit receipt verification to sandbox.")]
    EnvironmentMismatchSandbox,

    #[error("Receipt is a production receipt but sent to sandbox server. Resubmit receipt to production server.")]
    EnvironmentMismatchProduction,

    #[error("The receipt could not be authorized.")]
    AuthorizationFailed,

    #[error("Receipt server returned unrecognized status {0}.")]
    UnknownStatus(i32),
}

impl ValidationError {
    /// Maps a verifyReceipt `status` to its error. Returns `None` for `0`.
    pub fn from_status(status: i32) -> Option<Self> {
        Some(match status {
            0 => return None,
            21000 => Self::JsonReadFailure("status 21000".to_owned()),
            21002 => Self::DataMalformed,
            21003 => Self::AuthenticationError,
            21004 => Self::SharedSecretError,
            21005 => Self::ServerUnavailable,
            21006 => Self::SubscriptionExpired,
            21007 => Self::EnvironmentMismatchSandbox,
            21008 => Self::EnvironmentMismatchProduction,
            21010 => Self::AuthorizationFailed,
            other => Self::UnknownStatus(other),
        })
    }

    /// Numeric code for the error. Server-originated errors use the status
    /// code they were mapped from.
    pub fn code(&self) -> i32 {
        match self {
            Self::RequestError(_) => 1899,
            Self::ReceiptLoadError => 2000,
            Self::JsonReadFailure(_) => 21000,
            Self::DataMalformed => 21002,
            Self::AuthenticationError => 21003,
            Self::SharedSecretError => 21004,
            Self::ServerUnavailable => 21005,
            Self::SubscriptionExpired => 21006,
            Self::EnvironmentMismatchSandbox => 21007,
            Self::EnvironmentMismatchProduction => 21008,
            Self::AuthorizationFailed => 21010,
            Self::UnknownStatus(status) => *status,
        }
    }

    pub fn is_environment_mismatch(&self) -> bool {
        self.redirect_endpoint().is_some()
    }

    /// The endpoint the receipt should be resubmitted to, if the server
    /// reported that it was sent to the wrong environment.
    pub fn redirect_endpoint(&self) -> Option<Endpoint> {
        match self {
            Self::EnvironmentMismatchSandbox => Some(Endpoint::Sandbox),
            Self::EnvironmentMismatchProduction => Some(Endpoint::Production),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        !self.is_environment_mismatch()
    }
}
