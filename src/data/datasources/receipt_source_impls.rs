use std::path::PathBuf;

use async_trait::async_trait;

use crate::domain::repositories::receipt_source::ReceiptSource;

/// Reads the receipt from a file, such as the app store receipt path of an
/// installation.
#[derive(Debug, Clone)]
pub struct FileReceiptSource {
    path: PathBuf,
}

impl FileReceiptSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ReceiptSource for FileReceiptSource {
    async fn load_receipt(&self) -> Option<Vec<u8>> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Error loading receipt data.");
                None
            }
        }
    }
}

/// Receipt already held in memory, for example one received from a client
/// app in a request body.
#[derive(Debug, Clone, Default)]
pub struct InMemoryReceiptSource {
    receipt: Option<Vec<u8>>,
}

impl InMemoryReceiptSource {
    pub fn new(receipt: impl Into<Vec<u8>>) -> Self {
        Self {
            receipt: Some(receipt.into()),
        }
    }

    pub fn empty() -> Self {
        Self { receipt: None }
    }
}

#[async_trait]
impl ReceiptSource for InMemoryReceiptSource {
    async fn load_receipt(&self) -> Option<Vec<u8>> {
        self.receipt.clone()
    }
}
