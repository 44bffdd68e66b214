pub(crate) mod data {
    pub(crate) mod datasources {
        pub(crate) mod receipt_source_impls;
        pub(crate) mod utils;
        pub(crate) mod verify_receipt_datasource;
    }
    pub(crate) mod models {
        pub(crate) mod verify_receipt {
            pub(crate) mod status_envelope_model;
            pub(crate) mod verify_receipt_request_model;
        }
    }
    pub(crate) mod repositories {
        pub(crate) mod receipt_repository_impl;
    }
}

pub mod domain {
    pub mod entities {
        pub mod environment;
        pub mod pending_renewal_info;
        pub mod purchase_status;
        pub mod receipt_validation_response;
        pub mod subscription;
        pub mod subscription_receipt;
    }
    pub mod repositories {
        pub mod receipt_repository;
        pub mod receipt_source;
    }
    pub mod services {
        pub mod subscription_state_resolver;
    }
}

pub mod config;
pub mod constants;
pub mod date_format;
pub mod errors;
pub mod validator;

pub use crate::config::ReceiptValidatorConfig;
pub use data::{
    datasources::{
        receipt_source_impls::{FileReceiptSource, InMemoryReceiptSource},
        verify_receipt_datasource::VerifyReceiptDatasource,
    },
    models::verify_receipt::verify_receipt_request_model::VerifyReceiptRequestModel,
};
pub use domain::{
    entities::{
        environment::{Endpoint, Environment},
        pending_renewal_info::{
            AutoRenewStatus, ExpirationIntent, PendingRenewalInfo, PriceConsentStatus,
        },
        purchase_status::{
            purchase_status_channel, PurchaseFlow, PurchaseState, PurchaseStatus,
            PurchaseStatusReceiver, PurchaseStatusSender,
        },
        receipt_validation_response::ReceiptValidationResponse,
        subscription::{CancellationReason, Subscription},
        subscription_receipt::SubscriptionReceipt,
    },
    repositories::{receipt_repository::ReceiptRepository, receipt_source::ReceiptSource},
    services::subscription_state_resolver::current_subscription,
};
pub use errors::ValidationError;
pub use validator::ReceiptValidator;
